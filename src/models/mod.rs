pub mod facility;
pub mod feedback;
pub mod form;
pub mod payload;
pub mod response;
