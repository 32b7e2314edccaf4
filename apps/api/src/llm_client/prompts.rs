// Shared prompt constants.
// Each operation defines its own template in toolkit/prompts.rs.
// This file contains cross-cutting prompt fragments.

/// System prompt sent with every completion call.
pub const WRITING_ASSISTANT_SYSTEM: &str = "You are a writing assistant. \
    You help a single user refine, outline, proofread, and discuss their writing. \
    Always honour the user's writing style profile and follow the output format \
    requested in the user message exactly.";

/// Ranks the user's explicit request above style fidelity.
/// Follows the request and the material to work on in the refine and outline
/// prompts. Proofread and chat prompts do not carry it.
pub const USER_PRIORITY_INSTRUCTION: &str = "\
CRITICAL: The user's request above is the MOST IMPORTANT requirement. Follow it exactly. \
If the request conflicts with the style profile, the request wins.";

/// Instruction appended to prompts that expect a JSON reply.
pub const JSON_ONLY_INSTRUCTION: &str = "\
Respond with valid JSON only. \
Do NOT include any text outside the JSON object. \
Do NOT use markdown code fences.";
