//! Namecheap Registrar 集成测试（sandbox 环境）
//!
//! 运行方式:
//! ```bash
//! NAMECHEAP_API_USER=xxx NAMECHEAP_API_KEY=xxx NAMECHEAP_CLIENT_IP=203.0.113.7 \
//!     cargo test -p site-provisioner-provider --test namecheap_test -- --ignored --nocapture
//! ```

mod common;

use common::{generate_test_name, namecheap_sandbox_config};
use site_provisioner_provider::{NamecheapConfig, ProviderError, create_registrar};

#[tokio::test]
#[ignore = "integration test: requires NAMECHEAP_API_USER, NAMECHEAP_API_KEY and NAMECHEAP_CLIENT_IP"]
async fn test_namecheap_check_unregistered_domain() {
    skip_if_no_credentials!("NAMECHEAP_API_USER", "NAMECHEAP_API_KEY", "NAMECHEAP_CLIENT_IP");

    let config = require_some!(namecheap_sandbox_config(), "读取配置失败");
    let registrar = require_ok!(create_registrar(&config), "创建 registrar 失败");

    let domain = format!("{}.com", generate_test_name());
    let availability = require_ok!(
        registrar.check_availability(&domain).await,
        "check_availability 失败"
    );
    assert_eq!(availability.domain, domain);
    assert!(availability.available, "随机域名应可注册");

    println!("✓ check_availability 测试通过: {domain}");
}

#[tokio::test]
#[ignore = "integration test: requires NAMECHEAP_API_USER, NAMECHEAP_API_KEY and NAMECHEAP_CLIENT_IP"]
async fn test_namecheap_check_registered_domain() {
    skip_if_no_credentials!("NAMECHEAP_API_USER", "NAMECHEAP_API_KEY", "NAMECHEAP_CLIENT_IP");

    let config = require_some!(namecheap_sandbox_config(), "读取配置失败");
    let registrar = require_ok!(create_registrar(&config), "创建 registrar 失败");

    let availability = require_ok!(
        registrar.check_availability("google.com").await,
        "check_availability 失败"
    );
    assert!(!availability.available);
}

#[tokio::test]
#[ignore = "integration test: requires NAMECHEAP_CLIENT_IP"]
async fn test_namecheap_invalid_key() {
    skip_if_no_credentials!("NAMECHEAP_CLIENT_IP");

    let registrar = require_ok!(
        create_registrar(&NamecheapConfig {
            api_user: "nobody".to_string(),
            api_key: "invalid".to_string(),
            client_ip: std::env::var("NAMECHEAP_CLIENT_IP").unwrap_or_default(),
            sandbox: true,
            ..NamecheapConfig::default()
        }),
        "创建 registrar 失败"
    );

    let result = registrar.check_availability("example.com").await;
    assert!(
        matches!(result, Err(ProviderError::InvalidCredentials { .. })),
        "应返回 InvalidCredentials: {result:?}"
    );
}
