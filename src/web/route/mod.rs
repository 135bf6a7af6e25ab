pub mod resource;

pub use resource::router;
