use std::time::Duration;

use planets_api::config::{
    AppConfig, CatalogSection, S3StorageSection, StorageBackendKind, StorageSection,
};
use planets_api::storage::StorageConfig;

#[test]
fn defaults_are_valid() {
    let config = AppConfig::default();
    config.validate().expect("default configuration should be valid");

    assert_eq!(config.server.port, 8080);
    assert_eq!(
        config.storage_runtime().unwrap(),
        StorageConfig::Local {
            root_path: "./data".to_string()
        }
    );

    let catalog = config.catalog_runtime().unwrap();
    assert_eq!(catalog.base_url, "https://swapi.dev/api/planets/");
    assert_eq!(catalog.timeout, Duration::from_secs(10));
    assert!(catalog.user_agent.starts_with("planets-api/"));
}

#[test]
fn s3_backend_requires_bucket() {
    let config = AppConfig {
        storage: StorageSection {
            backend: StorageBackendKind::S3,
            local: None,
            s3: Some(S3StorageSection {
                region: "us-east-1".into(),
                ..Default::default()
            }),
        },
        ..Default::default()
    };

    assert!(config.storage_runtime().is_err());
}

#[test]
fn s3_backend_trims_prefix() {
    let config = AppConfig {
        storage: StorageSection {
            backend: StorageBackendKind::S3,
            local: None,
            s3: Some(S3StorageSection {
                bucket: "bucket".into(),
                region: "region".into(),
                endpoint: None,
                prefix: Some(" tenant/planets ".into()),
            }),
        },
        ..Default::default()
    };

    match config.storage_runtime().expect("S3 configuration should be valid") {
        StorageConfig::S3 { prefix, .. } => {
            assert_eq!(prefix.as_deref(), Some("tenant/planets"));
        }
        other => panic!("Unexpected storage config: {other:?}"),
    }
}

#[test]
fn catalog_rejects_bad_url_and_zero_timeout() {
    let bad_url = AppConfig {
        catalog: CatalogSection {
            base_url: "ftp://swapi.dev/api/planets/".into(),
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(bad_url.validate().is_err());

    let zero_timeout = AppConfig {
        catalog: CatalogSection {
            timeout_secs: 0,
            ..Default::default()
        },
        ..Default::default()
    };
    assert!(zero_timeout.validate().is_err());
}

#[test]
fn catalog_keeps_custom_user_agent() {
    let config = AppConfig {
        catalog: CatalogSection {
            user_agent: "Mozilla/5.0".into(),
            ..Default::default()
        },
        ..Default::default()
    };

    assert_eq!(config.catalog_runtime().unwrap().user_agent, "Mozilla/5.0");
}
