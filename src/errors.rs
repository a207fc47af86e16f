use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IpFinderError {
    Transport(String),
    HttpStatus(u16),
    MalformedResponse(String),
    RateLimited(String),
    ProviderRejected(String),
}

impl IpFinderError {
    /// 获取错误代码
    pub fn code(&self) -> &'static str {
        match self {
            IpFinderError::Transport(_) => "E001",
            IpFinderError::HttpStatus(_) => "E002",
            IpFinderError::MalformedResponse(_) => "E003",
            IpFinderError::RateLimited(_) => "E004",
            IpFinderError::ProviderRejected(_) => "E005",
        }
    }

    /// 获取错误类型名称
    pub fn error_type(&self) -> &'static str {
        match self {
            IpFinderError::Transport(_) => "Transport Error",
            IpFinderError::HttpStatus(_) => "HTTP Status Error",
            IpFinderError::MalformedResponse(_) => "Malformed Response",
            IpFinderError::RateLimited(_) => "Provider Rate Limited",
            IpFinderError::ProviderRejected(_) => "Provider Rejected Request",
        }
    }

    /// 获取错误详情
    pub fn message(&self) -> String {
        match self {
            IpFinderError::HttpStatus(status) => format!("upstream returned status {}", status),
            IpFinderError::Transport(msg)
            | IpFinderError::MalformedResponse(msg)
            | IpFinderError::RateLimited(msg)
            | IpFinderError::ProviderRejected(msg) => msg.clone(),
        }
    }

    /// 是否可恢复（主 provider 阶段可恢复错误会触发 fallback）
    ///
    /// 传输失败、非 2xx、响应体无法解析、限流均视为可恢复；
    /// provider 明确拒绝（如非法 IP）不可恢复。
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            IpFinderError::Transport(_)
                | IpFinderError::HttpStatus(_)
                | IpFinderError::MalformedResponse(_)
                | IpFinderError::RateLimited(_)
        )
    }

    /// 根据主 provider 返回的 reason 文本分类
    ///
    /// provider 不提供机器可读的错误码，只能对 reason 做子串匹配：
    /// 包含 "rate" 或 "limit"（不区分大小写）视为限流。
    /// 上游改动措辞会让这个判断失效。
    pub fn classify_provider_reason(reason: &str) -> Self {
        let lowered = reason.to_lowercase();
        if lowered.contains("rate") || lowered.contains("limit") {
            IpFinderError::rate_limited(reason)
        } else {
            IpFinderError::provider_rejected(reason)
        }
    }

    /// 格式化为简洁输出
    pub fn format_simple(&self) -> String {
        format!("{}: {}", self.error_type(), self.message())
    }
}

impl fmt::Display for IpFinderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format_simple())
    }
}

impl std::error::Error for IpFinderError {}

// 便捷的构造函数
impl IpFinderError {
    pub fn transport<T: Into<String>>(msg: T) -> Self {
        IpFinderError::Transport(msg.into())
    }

    pub fn http_status(status: u16) -> Self {
        IpFinderError::HttpStatus(status)
    }

    pub fn malformed_response<T: Into<String>>(msg: T) -> Self {
        IpFinderError::MalformedResponse(msg.into())
    }

    pub fn rate_limited<T: Into<String>>(msg: T) -> Self {
        IpFinderError::RateLimited(msg.into())
    }

    pub fn provider_rejected<T: Into<String>>(msg: T) -> Self {
        IpFinderError::ProviderRejected(msg.into())
    }
}

impl From<ureq::Error> for IpFinderError {
    fn from(err: ureq::Error) -> Self {
        match err {
            ureq::Error::StatusCode(status) => IpFinderError::HttpStatus(status),
            other => IpFinderError::Transport(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for IpFinderError {
    fn from(err: serde_json::Error) -> Self {
        IpFinderError::MalformedResponse(err.to_string())
    }
}

impl From<std::io::Error> for IpFinderError {
    fn from(err: std::io::Error) -> Self {
        IpFinderError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, IpFinderError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_rate_limit_reason() {
        let err = IpFinderError::classify_provider_reason("Rate limit exceeded");
        assert!(matches!(err, IpFinderError::RateLimited(_)));
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_classify_is_case_insensitive() {
        assert!(matches!(
            IpFinderError::classify_provider_reason("RATELIMITED"),
            IpFinderError::RateLimited(_)
        ));
        assert!(matches!(
            IpFinderError::classify_provider_reason("Daily LIMIT reached"),
            IpFinderError::RateLimited(_)
        ));
    }

    #[test]
    fn test_classify_generic_reason_is_terminal() {
        let err = IpFinderError::classify_provider_reason("Invalid IP Address");
        assert!(matches!(err, IpFinderError::ProviderRejected(_)));
        assert!(!err.is_recoverable());
    }

    #[test]
    fn test_http_status_message() {
        let err = IpFinderError::http_status(429);
        assert_eq!(err.code(), "E002");
        assert_eq!(err.message(), "upstream returned status 429");
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_from_serde_error_is_malformed() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: IpFinderError = parse_err.into();
        assert!(matches!(err, IpFinderError::MalformedResponse(_)));
    }
}
