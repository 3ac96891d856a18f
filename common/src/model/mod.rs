pub mod page;
pub mod response;
pub mod survey;
