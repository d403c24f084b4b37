use anyhow::Result;
use std::time::Duration;
use tokio::time::sleep;

/// 判断错误是否值得重试：请求超时、连接失败、或 5xx 网关类状态码。
/// 其余错误（4xx、响应解析失败等）直接返回调用方。
fn is_transient(err: &anyhow::Error) -> bool {
    match err.downcast_ref::<reqwest::Error>() {
        Some(e) => {
            e.is_timeout()
                || e.is_connect()
                || e.status()
                    .map(|s| matches!(s.as_u16(), 500 | 502 | 503 | 504))
                    .unwrap_or(false)
        }
        None => false,
    }
}

/// 指数退避重试工具。
///
/// # Arguments
/// * `max_retries` - 最大重试次数（不含首次请求，总共最多执行 max_retries + 1 次）
/// * `operation` - 异步操作闭包
pub async fn retry_with_backoff<F, Fut, T>(max_retries: u32, operation: F) -> Result<T>
where
    F: Fn() -> Fut,
    Fut: std::future::Future<Output = Result<T>>,
{
    let mut last_err = None;

    for attempt in 0..=max_retries {
        match operation().await {
            Ok(val) => return Ok(val),
            Err(e) => {
                if !is_transient(&e) || attempt == max_retries {
                    return Err(e);
                }

                // 指数退避: 1s, 2s, 4s
                let delay = Duration::from_secs(1 << attempt);
                log::warn!(
                    "数据中心请求失败（第 {} 次），{}s 后重试: {}",
                    attempt + 1,
                    delay.as_secs(),
                    e
                );
                last_err = Some(e);
                sleep(delay).await;
            }
        }
    }

    Err(last_err.unwrap_or_else(|| anyhow::anyhow!("retry exhausted")))
}
