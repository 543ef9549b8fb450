/// 上传文件
///
/// 路由层解析 multipart 后交给本层的文件载荷。
#[derive(Debug, Clone)]
pub struct UploadedFile {
    /// 原始文件名（不可信，使用前必须清洗）
    pub filename: String,
    /// 文件内容
    pub data: Vec<u8>,
}

impl UploadedFile {
    pub fn new(filename: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            filename: filename.into(),
            data,
        }
    }

    /// 获取扩展名（最右侧点号之后的部分，小写）
    pub fn extension(&self) -> Option<String> {
        self.filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_lowercase())
    }
}
