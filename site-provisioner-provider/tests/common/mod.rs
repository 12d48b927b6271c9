//! 共享测试工具和辅助函数

#![allow(dead_code)]

use std::env;

use site_provisioner_provider::{
    CloudflareConfig, GithubConfig, NamecheapConfig, VercelConfig,
};

/// 跳过测试的宏（当环境变量缺失时）
#[macro_export]
macro_rules! skip_if_no_credentials {
    ($($var:expr),+) => {
        $(
            if std::env::var($var).is_err() {
                eprintln!("跳过测试: 缺少环境变量 {}", $var);
                return;
            }
        )+
    };
}

/// 断言 `Option` 为 `Some`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_some {
    ($expr:expr, $($msg:tt)+) => {{
        let opt = $expr;
        assert!(opt.is_some(), "{}", format_args!($($msg)+));
        let Some(val) = opt else {
            return;
        };
        val
    }};
}

/// 断言 `Result` 为 `Ok`，并解包返回内部值（失败则直接让测试失败）。
#[macro_export]
macro_rules! require_ok {
    ($expr:expr, $($msg:tt)+) => {{
        let res = $expr;
        assert!(
            res.is_ok(),
            "{}: {:?}",
            format_args!($($msg)+),
            res.as_ref().err()
        );
        let Ok(val) = res else {
            return;
        };
        val
    }};
}

/// 生成唯一的测试名称（记录名、仓库名）
pub fn generate_test_name() -> String {
    let uuid = uuid::Uuid::new_v4();
    format!("sp-test-{}", &uuid.to_string()[..8])
}

pub fn namecheap_sandbox_config() -> Option<NamecheapConfig> {
    Some(NamecheapConfig {
        api_user: env::var("NAMECHEAP_API_USER").ok()?,
        api_key: env::var("NAMECHEAP_API_KEY").ok()?,
        client_ip: env::var("NAMECHEAP_CLIENT_IP").ok()?,
        sandbox: true,
        ..NamecheapConfig::default()
    })
}

pub fn cloudflare_config() -> Option<CloudflareConfig> {
    Some(CloudflareConfig {
        api_token: env::var("CLOUDFLARE_API_TOKEN").ok()?,
        account_id: env::var("CLOUDFLARE_ACCOUNT_ID").ok()?,
    })
}

pub fn vercel_config() -> Option<VercelConfig> {
    Some(VercelConfig {
        token: env::var("VERCEL_TOKEN").ok()?,
        project_id: Some(env::var("VERCEL_PROJECT_ID").ok()?),
        team_id: env::var("VERCEL_TEAM_ID").ok(),
    })
}

pub fn github_config() -> Option<GithubConfig> {
    Some(GithubConfig {
        token: env::var("GITHUB_TOKEN").ok()?,
        organization: env::var("GITHUB_ORG").ok(),
    })
}

/// 测试用域名（必须已托管在测试账户中）
pub fn test_domain() -> Option<String> {
    env::var("TEST_DOMAIN").ok()
}
