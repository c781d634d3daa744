//! End-to-end tests over the JSON wire form, the shape users actually write.

use std::sync::Once;

use serde_json::{json, Value};
use xenforge_builder::{
    ArtifactFormat, BuildSpec, IpDiscoveryMode, IsoSource, RawBuilderConfig, RetentionPolicy,
    ValidationError,
};
use xenforge_pool::MockPool;

static LOGGING: Once = Once::new();

fn init() {
    LOGGING.call_once(|| {
        xenforge_common::init_logging("warn").unwrap();
    });
}

fn test_config() -> Value {
    json!({
        "remote_host": "localhost",
        "remote_username": "admin",
        "remote_password": "admin",
        "vm_name": "foo",
        "iso_checksum": "md5:A221725EE181A44C67E25BD6A2516742",
        "iso_url": "http://www.google.com/",
        "shutdown_command": "yes",
        "ssh_username": "foo",
    })
}

fn validate(value: Value) -> Result<BuildSpec, Vec<ValidationError>> {
    let raw: RawBuilderConfig =
        serde_json::from_value(value).expect("wire config should deserialize");
    BuildSpec::validate(raw, "foo")
}

#[test]
fn test_prepare_defaults() {
    init();
    let spec = validate(test_config()).unwrap();

    assert_eq!(spec.common.tools_iso_name, "xs-tools.iso");
    assert_eq!(spec.clone_template, "Other install media");
    assert_eq!(spec.common.vm_name, "foo");
    assert_eq!(spec.common.format, ArtifactFormat::Xva);
    assert_eq!(spec.common.keep_vm, RetentionPolicy::Never);
    assert_eq!(spec.common.ip_getter, IpDiscoveryMode::Auto);
}

#[test]
fn test_prepare_disk_size() {
    let spec = validate(test_config()).unwrap();
    assert_eq!(spec.disk_size, 40_000);

    let mut config = test_config();
    config["disk_size"] = json!(60_000);
    let spec = validate(config).unwrap();
    assert_eq!(spec.disk_size, 60_000);
}

#[test]
fn test_prepare_format() {
    let mut config = test_config();

    // Bad
    config["format"] = json!("foo");
    let errs = validate(config.clone()).unwrap_err();
    assert!(errs
        .iter()
        .any(|err| matches!(err, ValidationError::InvalidChoice { field: "format", .. })));

    // Good
    config["format"] = json!("vdi_raw");
    let spec = validate(config).unwrap();
    assert_eq!(spec.common.format, ArtifactFormat::VdiRaw);
}

#[test]
fn test_prepare_http_port() {
    let mut config = test_config();

    // Bad
    config["http_port_min"] = json!(1000);
    config["http_port_max"] = json!(500);
    let errs = validate(config.clone()).unwrap_err();
    assert_eq!(errs.len(), 1);
    assert!(matches!(errs[0], ValidationError::PortRange("HTTP")));

    // Bad: a negative port never deserializes
    config["http_port_min"] = json!(-500);
    assert!(serde_json::from_value::<RawBuilderConfig>(config.clone()).is_err());

    // Good
    config["http_port_min"] = json!(500);
    config["http_port_max"] = json!(1000);
    validate(config).unwrap();
}

#[test]
fn test_prepare_invalid_key() {
    let mut config = test_config();
    config["i_should_not_be_valid"] = json!(true);
    assert!(serde_json::from_value::<RawBuilderConfig>(config).is_err());
}

#[test]
fn test_prepare_iso_checksum() {
    // Bad: empty
    let mut config = test_config();
    config["iso_checksum"] = json!("");
    let errs = validate(config).unwrap_err();
    assert!(errs
        .iter()
        .any(|err| matches!(err, ValidationError::Checksum(_))));

    let bad_checksums = [
        "md5:A221725EE181A44C6742BAD",
        "A221725EE181A44C6742BAD",
        "Z221725EE181A44C67E25BD6A2516BAD",
    ];
    for bad in bad_checksums {
        let mut config = test_config();
        config["iso_checksum"] = json!(bad);
        let errs = validate(config).unwrap_err();
        assert!(
            errs.iter()
                .any(|err| matches!(err, ValidationError::Checksum(_))),
            "{bad} should be rejected"
        );
    }

    let good_checksums = [
        "sha512:1F0E0CE0036C7EAACA84ECB41A93F352029B3BAFDF83E9E469E5E26980075231C553ABA90E5687E36F63F05915C317D8FA4BE33BBC505112BA64FFD754D382A1",
        "1F0E0CE0036C7EAACA84ECB41A93F352029B3BAFDF83E9E469E5E26980075231C553ABA90E5687E36F63F05915C317D8FA4BE33BBC505112BA64FFD754D382A1",
        "sha256:BA4F78A4C2E928D49829AABFBF204305D6D24C7F189DD071CDE25A4D490F1219",
        "BA4F78A4C2E928D49829AABFBF204305D6D24C7F189DD071CDE25A4D490F1219",
        "sha1:69F180CA9D93DAE6670360F38D0E7D6228993F7E",
        "69F180CA9D93DAE6670360F38D0E7D6228993F7E",
        "md5:A221725EE181A44C67E25BD6A2516742",
        "A221725EE181A44C67E25BD6A2516742",
        "none",
    ];
    for good in good_checksums {
        for descriptor in [good.to_string(), good.to_lowercase()] {
            let mut config = test_config();
            config["iso_checksum"] = json!(descriptor);
            validate(config).unwrap_or_else(|errs| {
                panic!("{descriptor} should be accepted: {errs:?}");
            });
        }
    }
}

#[test]
fn test_prepare_iso_url() {
    // Both empty
    let mut config = test_config();
    config["iso_url"] = json!("");
    let errs = validate(config).unwrap_err();
    assert!(errs
        .iter()
        .any(|err| matches!(err, ValidationError::MissingIsoSource)));

    // iso_url set
    let mut config = test_config();
    config["iso_url"] = json!("http://www.packer.io");
    let spec = validate(config).unwrap();
    assert_eq!(
        spec.source,
        IsoSource::Urls(vec!["http://www.packer.io".to_string()])
    );

    // Both set
    let mut config = test_config();
    config["iso_url"] = json!("http://www.packer.io");
    config["iso_urls"] = json!(["http://www.packer.io"]);
    let errs = validate(config).unwrap_err();
    assert!(errs
        .iter()
        .any(|err| matches!(err, ValidationError::ConflictingIsoSource)));

    // Just iso_urls set
    let mut config = test_config();
    config.as_object_mut().unwrap().remove("iso_url");
    config["iso_urls"] = json!(["http://www.packer.io", "http://www.hashicorp.com"]);
    let spec = validate(config).unwrap();
    assert_eq!(
        spec.source,
        IsoSource::Urls(vec![
            "http://www.packer.io".to_string(),
            "http://www.hashicorp.com".to_string(),
        ])
    );
}

#[test]
fn test_prepare_iso_name() {
    // iso_name conflicts with iso_url
    let mut config = test_config();
    config["iso_name"] = json!("my_iso");
    assert!(validate(config).is_err());

    // ... and with iso_urls
    let mut config = test_config();
    config.as_object_mut().unwrap().remove("iso_url");
    config["iso_name"] = json!("my_iso");
    config["iso_urls"] = json!(["http://www.hashicorp.com"]);
    assert!(validate(config).is_err());

    // Alone it is fine
    let mut config = test_config();
    config.as_object_mut().unwrap().remove("iso_url");
    config["iso_name"] = json!("my_iso");
    let spec = validate(config).unwrap();
    assert_eq!(spec.source, IsoSource::Existing("my_iso".to_string()));
}

#[test]
fn test_prepare_keep_vm() {
    let mut config = test_config();

    // Bad
    config["keep_vm"] = json!("foo");
    let errs = validate(config.clone()).unwrap_err();
    assert!(errs
        .iter()
        .any(|err| matches!(err, ValidationError::InvalidChoice { field: "keep_vm", .. })));

    // Good
    config["keep_vm"] = json!("always");
    let spec = validate(config).unwrap();
    assert_eq!(spec.common.keep_vm, RetentionPolicy::Always);
}

#[test]
fn test_documented_example() {
    let spec = validate(json!({
        "remote_username": "admin",
        "remote_password": "admin",
        "remote_host": "localhost",
        "ssh_username": "foo",
        "sr_name": "",
        "sr_iso_name": "iso-store",
        "iso_checksum": "md5:a221725ee181a44c67e25bd6a2516742",
        "iso_url": "http://example/x.iso",
    }))
    .unwrap();

    assert_eq!(spec.common.format, ArtifactFormat::Xva);
    assert_eq!(spec.common.keep_vm, RetentionPolicy::Never);
    assert_eq!(spec.common.ip_getter, IpDiscoveryMode::Auto);
    assert_eq!(spec.common.sr_iso_name, "iso-store");
}

#[test]
fn test_revalidation_is_idempotent() {
    let spec = validate(test_config()).unwrap();

    let wire = serde_json::to_value(&spec).expect("spec serializes to the wire vocabulary");
    let raw: RawBuilderConfig =
        serde_json::from_value(wire).expect("serialized spec deserializes as raw input");
    let revalidated = BuildSpec::validate(raw, "foo").unwrap();

    assert_eq!(revalidated, spec);
}

#[tokio::test]
async fn test_resolves_storage_from_validated_spec() {
    let mut config = test_config();
    config["sr_name"] = json!("");
    config["sr_iso_name"] = json!("iso-store");
    let spec = validate(config).unwrap();

    let pool = MockPool::new();
    let default_sr = pool.add_sr("Local storage");
    pool.add_own_pool(Some(default_sr.clone()));
    let iso_sr = pool.add_sr("iso-store");

    assert_eq!(spec.common.resolve_sr(&pool).await.unwrap(), default_sr);
    assert_eq!(spec.common.resolve_iso_sr(&pool).await.unwrap(), iso_sr);
}
