//! Vercel HostingPlatform 集成测试
//!
//! 运行方式:
//! ```bash
//! VERCEL_TOKEN=xxx VERCEL_PROJECT_ID=prj_xxx TEST_DOMAIN=example.com \
//!     cargo test -p site-provisioner-provider --test vercel_test -- --ignored --nocapture
//! ```

mod common;

use common::{test_domain, vercel_config};
use site_provisioner_provider::create_hosting_platform;

#[tokio::test]
#[ignore = "integration test: requires VERCEL_TOKEN, VERCEL_PROJECT_ID and TEST_DOMAIN"]
async fn test_vercel_domain_lifecycle() {
    skip_if_no_credentials!("VERCEL_TOKEN", "VERCEL_PROJECT_ID", "TEST_DOMAIN");

    let config = require_some!(vercel_config(), "读取配置失败");
    let domain = require_some!(test_domain(), "缺少 TEST_DOMAIN");
    let platform = require_ok!(create_hosting_platform(&config, None), "创建 platform 失败");

    let added = require_ok!(platform.add_domain(&domain).await, "add_domain 失败");
    println!(
        "✓ add_domain: verified={}, {} 条验证记录",
        added.verified,
        added.verification_records.len()
    );

    // 重复添加应复用已有域名
    let again = require_ok!(platform.add_domain(&domain).await, "重复 add_domain 失败");
    assert_eq!(again.name, added.name);

    let verified = require_ok!(platform.check_verified(&domain).await, "check_verified 失败");
    println!("✓ check_verified: {verified}");

    require_ok!(platform.remove_domain(&domain).await, "remove_domain 失败");
    println!("✓ remove_domain 测试通过");
}
