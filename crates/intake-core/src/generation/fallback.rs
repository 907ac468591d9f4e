//! Fixed data substituted when the generation service fails.

use super::CONFIG_BATCH_SIZE;
use crate::round::ConfigOption;

/// Title of every placeholder option.
pub const FALLBACK_CONFIG_TITLE: &str = "生成服务繁忙";

/// Description of every placeholder option.
pub const FALLBACK_CONFIG_DESCRIPTION: &str = "请稍后重试或检查网络连接。";

/// Placeholder concept images.
pub const FALLBACK_IMAGE_URLS: [&str; 3] = [
    "https://picsum.photos/1920/1080?random=1",
    "https://picsum.photos/1920/1080?random=2",
    "https://picsum.photos/1920/1080?random=3",
];

/// Stored as the summary when the summary request fails.
pub const SUMMARY_FAILURE_MESSAGE: &str = "AI总结生成失败，请稍后重试。";

/// Placeholder option batch labeled as a busy service.
///
/// The entries stay selectable so the researcher is never blocked.
pub fn fallback_configs() -> Vec<ConfigOption> {
    (0..CONFIG_BATCH_SIZE)
        .map(|index| {
            ConfigOption::new(
                format!("err-{index}"),
                FALLBACK_CONFIG_TITLE,
                FALLBACK_CONFIG_DESCRIPTION,
            )
        })
        .collect()
}

/// Placeholder image batch.
pub fn fallback_images() -> Vec<String> {
    FALLBACK_IMAGE_URLS.iter().map(|url| url.to_string()).collect()
}

/// Whether an option is one of the placeholders.
pub fn is_fallback(option: &ConfigOption) -> bool {
    option.id.starts_with("err-") && option.title == FALLBACK_CONFIG_TITLE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fallback_batch() {
        let batch = fallback_configs();
        assert_eq!(batch.len(), 6);
        assert!(batch.iter().all(|option| option.title == FALLBACK_CONFIG_TITLE));
        assert!(batch.iter().all(is_fallback));
        assert_eq!(batch[5].id, "err-5");
    }
}
