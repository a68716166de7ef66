pub mod codec;
pub mod image_io;
pub mod rvf;
pub mod rvf_writer;
