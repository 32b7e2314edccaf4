// Profile store collaborator: read-only lookups of saved style profiles.
// The assist pipeline never touches this; profiles arrive pre-resolved in requests.

pub mod handlers;
pub mod store;
