use std::path::Path;
use std::sync::Arc;
use toml_edit::{Array, DocumentMut, Item, Table, Value};

/// Migrates config file to latest format if needed
pub async fn migrate_config_if_needed<P: AsRef<Path>>(
    path: P,
    events: Option<&Arc<mountfs_events::EventBus>>,
) -> anyhow::Result<()> {
    let content = tokio::fs::read_to_string(path.as_ref()).await?;
    let mut doc = content.parse::<DocumentMut>()?;

    let added_fields = migrate_document(&mut doc)?;

    // Only write if we added fields
    if !added_fields.is_empty() {
        tokio::fs::write(path.as_ref(), doc.to_string()).await?;

        if let Some(event_bus) = events {
            event_bus.emit(mountfs_events::AppEvent::ConfigMigrated {
                added_fields: added_fields.clone(),
            });
        }
    }

    Ok(())
}

/// Adds every missing section and field; returns what was added
fn migrate_document(doc: &mut DocumentMut) -> anyhow::Result<Vec<String>> {
    let mut added_fields = Vec::new();

    migrate_server_section(doc, &mut added_fields)?;
    migrate_filesystem_section(doc, &mut added_fields)?;
    migrate_local_section(doc, &mut added_fields)?;
    migrate_remote_section(doc, &mut added_fields)?;

    Ok(added_fields)
}

fn ensure_section<'a>(
    doc: &'a mut DocumentMut,
    name: &str,
    added_fields: &mut Vec<String>,
) -> anyhow::Result<&'a mut Table> {
    if !doc.contains_key(name) {
        doc[name] = Item::Table(Table::new());
        added_fields.push(name.to_string());
    }

    doc[name]
        .as_table_mut()
        .ok_or_else(|| anyhow::anyhow!("Invalid [{}] section in config", name))
}

fn migrate_server_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> anyhow::Result<()> {
    let server = ensure_section(doc, "server", added_fields)?;
    ensure_field(server, "host", Value::from("0.0.0.0"), added_fields);
    ensure_field(server, "port", Value::from(8080), added_fields);
    ensure_field(server, "tcp_nodelay", Value::from(true), added_fields);
    ensure_field(server, "timeout_secs", Value::from(60), added_fields);
    ensure_field(server, "max_concurrent_requests", Value::from(1000), added_fields);
    ensure_field(server, "max_body_size_mb", Value::from(100), added_fields);
    ensure_field(server, "enable_compression", Value::from(true), added_fields);

    if !server.contains_key("allowed_origins") {
        let mut arr = Array::new();
        arr.push("*");
        server["allowed_origins"] = Item::Value(Value::Array(arr));
        added_fields.push("server.allowed_origins".to_string());
    }

    Ok(())
}

fn migrate_filesystem_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> anyhow::Result<()> {
    let filesystem = ensure_section(doc, "filesystem", added_fields)?;
    ensure_field(filesystem, "uploads_root", Value::from("wp-content/uploads"), added_fields);
    ensure_field(filesystem, "max_path_length", Value::from(1024), added_fields);
    ensure_field(filesystem, "remote_enabled", Value::from(false), added_fields);
    ensure_field(filesystem, "uploads_use_yearmonth_folders", Value::from(true), added_fields);
    Ok(())
}

fn migrate_local_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> anyhow::Result<()> {
    let local = ensure_section(doc, "local", added_fields)?;
    ensure_field(local, "root", Value::from("wordpress"), added_fields);
    ensure_field(local, "file_mode", Value::from(0o644), added_fields);
    ensure_field(local, "dir_mode", Value::from(0o755), added_fields);
    Ok(())
}

fn migrate_remote_section(
    doc: &mut DocumentMut,
    added_fields: &mut Vec<String>,
) -> anyhow::Result<()> {
    let remote = ensure_section(doc, "remote", added_fields)?;
    ensure_field(remote, "client", Value::from("s3"), added_fields);
    ensure_field(remote, "endpoint_url", Value::from(""), added_fields);
    ensure_field(remote, "region", Value::from("auto"), added_fields);
    ensure_field(remote, "access_key_id", Value::from(""), added_fields);
    ensure_field(remote, "secret_access_key", Value::from(""), added_fields);
    ensure_field(remote, "bucket_name", Value::from("mountfs"), added_fields);
    ensure_field(remote, "bucket_prefix", Value::from(""), added_fields);
    Ok(())
}

fn ensure_field(
    table: &mut Table,
    key: &str,
    default_value: Value,
    added_fields: &mut Vec<String>,
) {
    if !table.contains_key(key) {
        table[key] = Item::Value(default_value);
        added_fields.push(key.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Config, DEFAULT_CONFIG_TEMPLATE};

    #[test]
    fn test_template_needs_no_migration() {
        let mut doc = DEFAULT_CONFIG_TEMPLATE.parse::<DocumentMut>().unwrap();
        assert!(migrate_document(&mut doc).unwrap().is_empty());
    }

    #[test]
    fn test_partial_config_gains_missing_fields() {
        let mut doc = "[server]\nhost = \"127.0.0.1\"\nport = 9000\n\n[filesystem]\nremote_enabled = true\n"
            .parse::<DocumentMut>()
            .unwrap();

        let added = migrate_document(&mut doc).unwrap();
        assert!(added.contains(&"uploads_root".to_string()));
        assert!(added.contains(&"local".to_string()));
        assert!(added.contains(&"remote".to_string()));
        assert!(!added.contains(&"host".to_string()));

        let config = Config::parse(&doc.to_string()).unwrap();
        assert_eq!(config.server.port, 9000);
        assert!(config.filesystem.remote_enabled);
        assert_eq!(config.local.file_mode, 0o644);
        assert_eq!(config.remote.bucket_name, "mountfs");
    }

    #[test]
    fn test_scalar_section_is_rejected() {
        let mut doc = "server = 1\n".parse::<DocumentMut>().unwrap();
        assert!(migrate_document(&mut doc).is_err());
    }

    #[tokio::test]
    async fn test_migration_rewrites_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        tokio::fs::write(&path, "[server]\nhost = \"0.0.0.0\"\nport = 8080\n").await.unwrap();

        migrate_config_if_needed(&path, None).await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        assert!(content.contains("[filesystem]"));
        assert!(content.contains("bucket_prefix"));
    }
}
