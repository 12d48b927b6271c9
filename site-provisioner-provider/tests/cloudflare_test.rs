//! Cloudflare DNS Provider 集成测试
//!
//! 运行方式:
//! ```bash
//! CLOUDFLARE_API_TOKEN=xxx CLOUDFLARE_ACCOUNT_ID=xxx TEST_DOMAIN=example.com \
//!     cargo test -p site-provisioner-provider --test cloudflare_test -- --ignored --nocapture --test-threads=1
//! ```

mod common;

use common::{cloudflare_config, generate_test_name, test_domain};
use site_provisioner_provider::{DnsRecord, ZoneState, create_dns_provider};

#[tokio::test]
#[ignore = "integration test: requires CLOUDFLARE_API_TOKEN, CLOUDFLARE_ACCOUNT_ID and TEST_DOMAIN"]
async fn test_cloudflare_create_zone_is_idempotent() {
    skip_if_no_credentials!("CLOUDFLARE_API_TOKEN", "CLOUDFLARE_ACCOUNT_ID", "TEST_DOMAIN");

    let config = require_some!(cloudflare_config(), "读取配置失败");
    let domain = require_some!(test_domain(), "缺少 TEST_DOMAIN");
    let provider = require_ok!(create_dns_provider(&config), "创建 provider 失败");

    let first = require_ok!(provider.create_zone(&domain).await, "第一次 create_zone 失败");
    let second = require_ok!(provider.create_zone(&domain).await, "第二次 create_zone 失败");

    assert_eq!(first.zone_id, second.zone_id, "两次调用应返回同一 zone");
    assert!(second.already_exists, "第二次调用应标记 already_exists");
    assert!(!second.name_servers.is_empty(), "应返回 nameservers");

    println!("✓ create_zone 幂等测试通过: {}", second.zone_id);
}

#[tokio::test]
#[ignore = "integration test: requires CLOUDFLARE_API_TOKEN, CLOUDFLARE_ACCOUNT_ID and TEST_DOMAIN"]
async fn test_cloudflare_record_lifecycle() {
    skip_if_no_credentials!("CLOUDFLARE_API_TOKEN", "CLOUDFLARE_ACCOUNT_ID", "TEST_DOMAIN");

    let config = require_some!(cloudflare_config(), "读取配置失败");
    let domain = require_some!(test_domain(), "缺少 TEST_DOMAIN");
    let provider = require_ok!(create_dns_provider(&config), "创建 provider 失败");
    let zone = require_ok!(provider.create_zone(&domain).await, "create_zone 失败");

    let record = DnsRecord::txt(generate_test_name(), "site-provisioner integration test");
    let record_id = require_ok!(
        provider.create_record(&zone.zone_id, &record).await,
        "create_record 失败"
    );
    println!("✓ 创建记录: {} -> {record_id}", record.label());

    require_ok!(
        provider.delete_record(&zone.zone_id, &record_id).await,
        "delete_record 失败"
    );
    println!("✓ 删除记录: {record_id}");
}

#[tokio::test]
#[ignore = "integration test: requires CLOUDFLARE_API_TOKEN, CLOUDFLARE_ACCOUNT_ID and TEST_DOMAIN"]
async fn test_cloudflare_zone_status() {
    skip_if_no_credentials!("CLOUDFLARE_API_TOKEN", "CLOUDFLARE_ACCOUNT_ID", "TEST_DOMAIN");

    let config = require_some!(cloudflare_config(), "读取配置失败");
    let domain = require_some!(test_domain(), "缺少 TEST_DOMAIN");
    let provider = require_ok!(create_dns_provider(&config), "创建 provider 失败");
    let zone = require_ok!(provider.create_zone(&domain).await, "create_zone 失败");

    let status = require_ok!(
        provider.get_zone_status(&zone.zone_id).await,
        "get_zone_status 失败"
    );
    let status = require_some!(status, "zone 应存在");
    assert_ne!(status.status, ZoneState::Unknown);

    let missing = require_ok!(
        provider.get_zone_status("0000000000000000000000000000dead").await,
        "查询不存在的 zone 不应报错"
    );
    assert!(missing.is_none());

    println!("✓ get_zone_status 测试通过: {:?}", status.status);
}
