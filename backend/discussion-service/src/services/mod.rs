pub mod posts;

pub use posts::PostService;
