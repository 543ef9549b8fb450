pub mod api;
pub mod category;
pub mod chat;
pub mod upload;

pub use api::{
    AnswerUploadResponse, ChatRequest, ChatResponse, DeleteResponse, ExamUploadResponse,
    GradeRequest, GradeResponse, NotesUploadResponse, SubmissionEntry,
};
pub use category::ContentCategory;
pub use chat::{ChatRole, ChatTurn};
pub use upload::UploadedFile;
