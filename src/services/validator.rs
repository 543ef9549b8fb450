//! 上传校验服务 - 业务能力层
//!
//! 在任何写入发生之前执行的检查，不做任何 I/O。
//! 检查按固定顺序短路，每种失败返回一个可区分的原因。

use phf::phf_set;

use crate::error::{AppError, AppResult, ValidationError};
use crate::models::UploadedFile;

/// 允许上传的扩展名
static ALLOWED_EXTENSIONS: phf::Set<&'static str> = phf_set! {
    "pdf",
    "png",
    "jpg",
    "jpeg",
};

/// 校验上传请求
///
/// 检查顺序：
/// 1. 文件载荷存在
/// 2. 文件名非空
/// 3. 扩展名（最右侧点号之后、大小写不敏感）在允许列表中
/// 4. 调用方声明的必填字段全部存在且非空
pub fn validate_upload(
    file: Option<&UploadedFile>,
    required_fields: &[(&str, Option<&str>)],
) -> AppResult<()> {
    let file = file.ok_or(ValidationError::MissingFile)?;

    if file.filename.trim().is_empty() {
        return Err(ValidationError::EmptyFilename.into());
    }

    let extension = file.extension().unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(extension.as_str()) {
        return Err(ValidationError::DisallowedExtension { extension }.into());
    }

    for (name, value) in required_fields {
        match value {
            Some(v) if !v.trim().is_empty() => {}
            _ => return Err(AppError::missing_field(*name)),
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    fn pdf_file() -> UploadedFile {
        UploadedFile::new("sheet.pdf", b"%PDF-1.4".to_vec())
    }

    #[test]
    fn test_missing_file_rejected_first() {
        let err = validate_upload(None, &[("studentName", None)]).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::MissingFile)
        ));
    }

    #[test]
    fn test_empty_filename_rejected() {
        let file = UploadedFile::new("", vec![1, 2, 3]);
        let err = validate_upload(Some(&file), &[]).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::EmptyFilename)
        ));
    }

    #[test]
    fn test_disallowed_extension_rejected() {
        let file = UploadedFile::new("malware.exe", vec![0]);
        let err = validate_upload(Some(&file), &[]).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::DisallowedExtension { .. })
        ));
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        let file = UploadedFile::new("Sheet.PDF", vec![0]);
        assert!(validate_upload(Some(&file), &[]).is_ok());

        let file = UploadedFile::new("photo.JPeG", vec![0]);
        assert!(validate_upload(Some(&file), &[]).is_ok());
    }

    #[test]
    fn test_file_without_extension_rejected() {
        let file = UploadedFile::new("README", vec![0]);
        assert!(validate_upload(Some(&file), &[]).is_err());
    }

    #[test]
    fn test_missing_required_field_rejected() {
        let file = pdf_file();
        let err = validate_upload(Some(&file), &[("studentName", None)]).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::MissingField { .. })
        ));

        let err = validate_upload(Some(&file), &[("studentName", Some("  "))]).unwrap_err();
        assert!(matches!(
            err,
            AppError::Validation(ValidationError::MissingField { .. })
        ));
    }

    #[test]
    fn test_valid_upload_passes() {
        let file = pdf_file();
        let fields = [
            ("classLevel", Some("Class 1")),
            ("subject", Some("Maths")),
            ("studentType", Some("Standard")),
        ];
        assert!(validate_upload(Some(&file), &fields).is_ok());
    }
}
