use thiserror::Error;

/// Errors surfaced while loading or validating a burger catalogue.
///
/// The built-in [`DEFAULT_MENU`](crate::catalogue::DEFAULT_MENU) can never
/// trigger these; they exist for the seam where a deployment supplies its
/// own menu.
#[derive(Debug, Error)]
pub enum CatalogueError {
    #[error("burger type {name:?} has no ingredients")]
    EmptyRecipe { name: String },
    #[error("burger type {name:?} recipe has {count} ingredients, limit is 10")]
    RecipeTooLong { name: String, count: usize },
    #[error("burger type name {name:?} is {len} characters, limit is 50")]
    NameTooLong { name: String, len: usize },
}
