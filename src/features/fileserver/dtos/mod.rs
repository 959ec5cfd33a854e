mod file_dto;

pub use file_dto::{
    format_size, FileEntryDto, UploadFileDto, MAX_FILE_SIZE, TIMESTAMP_FORMAT,
};
