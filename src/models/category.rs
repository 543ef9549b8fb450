/// 内容分类枚举
///
/// 决定一个文件存放在上传根目录下的哪棵子树。
/// 分类是封闭集合，未知分类在类型层面即不可表示。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ContentCategory {
    /// 考试试卷（管理员发布）
    ExamPaper,
    /// 课程讲义（管理员上传）
    Note,
    /// 答题卡提交（监护人上传）
    Submission,
}

impl ContentCategory {
    /// 获取分类对应的子目录名
    pub fn subdir(self) -> &'static str {
        match self {
            ContentCategory::ExamPaper => "exams",
            ContentCategory::Note => "notes",
            ContentCategory::Submission => "submissions",
        }
    }
}

impl std::fmt::Display for ContentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.subdir())
    }
}
