// build.rs - TOML-driven compile-time limits for the diagnostics core
use std::env;
use std::fs;
use std::path::Path;

#[derive(serde::Deserialize)]
struct CompileTimeConfig {
    source_map: SourceMapLimits,
    mapper: MapperLimits,
    report: ReportLimits,
    logging: LoggingLimits,
}

#[derive(serde::Deserialize)]
struct SourceMapLimits {
    max_entries: usize,
}

#[derive(serde::Deserialize)]
struct MapperLimits {
    max_stack_bytes: usize,
    max_batch_errors: usize,
}

#[derive(serde::Deserialize)]
struct ReportLimits {
    max_diagnostics_per_script: usize,
}

#[derive(serde::Deserialize)]
struct LoggingLimits {
    log_buffer_size: usize,
    max_log_message_length: usize,
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-env-changed=VERO_BUILD_PROFILE");
    println!("cargo:rerun-if-env-changed=VERO_CONFIG_DIR");

    let profile = env::var("VERO_BUILD_PROFILE").unwrap_or_else(|_| "development".to_string());
    let config_dir = env::var("VERO_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    // Workspace root is the parent of the vero_diagnostics directory
    let manifest_dir = env::var("CARGO_MANIFEST_DIR").unwrap();
    let workspace_root = Path::new(&manifest_dir)
        .parent()
        .expect("Could not find workspace root (parent directory)");

    let config_path = workspace_root
        .join(&config_dir)
        .join(format!("{}.toml", profile));

    println!("cargo:rerun-if-changed={}", config_path.display());

    if !config_path.exists() {
        panic!(
            "Configuration file not found: {}\nWorkspace root: {}\nLooking for: {}/{}/{}.toml",
            config_path.display(),
            workspace_root.display(),
            workspace_root.display(),
            config_dir,
            profile
        );
    }

    let config_content = fs::read_to_string(&config_path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {}", config_path.display(), e));

    let config: CompileTimeConfig = toml::from_str(&config_content)
        .unwrap_or_else(|e| panic!("Invalid TOML in {}: {}", config_path.display(), e));

    validate_limits(&config, &profile);
    generate_constants(&config, &profile);
}

fn validate_limits(config: &CompileTimeConfig, profile: &str) {
    const ABSOLUTE_MAX_SOURCE_MAP_ENTRIES: usize = 10_000_000;
    const ABSOLUTE_MAX_STACK_BYTES: usize = 16 * 1024 * 1024;
    const MIN_STACK_BYTES: usize = 1024;

    if config.source_map.max_entries == 0
        || config.source_map.max_entries > ABSOLUTE_MAX_SOURCE_MAP_ENTRIES
    {
        panic!("LIMITS: source_map.max_entries must be in 1..={ABSOLUTE_MAX_SOURCE_MAP_ENTRIES}");
    }

    if config.mapper.max_stack_bytes < MIN_STACK_BYTES
        || config.mapper.max_stack_bytes > ABSOLUTE_MAX_STACK_BYTES
    {
        panic!(
            "LIMITS: mapper.max_stack_bytes must be in {MIN_STACK_BYTES}..={ABSOLUTE_MAX_STACK_BYTES}"
        );
    }

    if config.mapper.max_batch_errors == 0 {
        panic!("LIMITS: mapper.max_batch_errors must be positive");
    }

    if config.report.max_diagnostics_per_script == 0 {
        panic!("LIMITS: report.max_diagnostics_per_script must be positive");
    }

    if config.logging.log_buffer_size < 100 || config.logging.log_buffer_size > 100_000 {
        panic!("LIMITS: logging.log_buffer_size must be in 100..=100000");
    }

    if profile == "production" && config.mapper.max_stack_bytes > 1024 * 1024 {
        panic!("PRODUCTION: mapper.max_stack_bytes too high for production");
    }
}

fn generate_constants(config: &CompileTimeConfig, profile: &str) {
    let out_dir = env::var("OUT_DIR").unwrap();
    let output_path = Path::new(&out_dir).join("constants.rs");

    let constants_code = format!(
        r#"
// Generated compile-time constants from TOML configuration
// Profile: {}
// DO NOT EDIT - Generated by build.rs

pub mod compile_time {{
    pub mod source_map {{
        pub const MAX_ENTRIES: usize = {};
    }}

    pub mod mapper {{
        pub const MAX_STACK_BYTES: usize = {};
        pub const MAX_BATCH_ERRORS: usize = {};
    }}

    pub mod report {{
        pub const MAX_DIAGNOSTICS_PER_SCRIPT: usize = {};
    }}

    pub mod logging {{
        pub const LOG_BUFFER_SIZE: usize = {};
        pub const MAX_LOG_MESSAGE_LENGTH: usize = {};
    }}
}}
"#,
        profile,
        config.source_map.max_entries,
        config.mapper.max_stack_bytes,
        config.mapper.max_batch_errors,
        config.report.max_diagnostics_per_script,
        config.logging.log_buffer_size,
        config.logging.max_log_message_length,
    );

    fs::write(output_path, constants_code).unwrap();
}
