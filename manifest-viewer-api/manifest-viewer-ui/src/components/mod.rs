pub mod resource_details;

pub use resource_details::ResourceDetails;
