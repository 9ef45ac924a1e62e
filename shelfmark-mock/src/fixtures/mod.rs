//! Static catalogue backing [`MockProvider`](crate::MockProvider).

pub mod catalogue;
pub mod google_books;
pub mod open_library;
