pub mod upload_root;

pub use upload_root::UploadRoot;
