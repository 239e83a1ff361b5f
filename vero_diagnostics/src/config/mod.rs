//! Configuration module for the diagnostics core
//! Compile-time limits come from the TOML profile selected at build time;
//! runtime preferences come from the environment.

// Include generated constants from build.rs
include!(concat!(env!("OUT_DIR"), "/constants.rs"));

pub mod runtime;

/// Build information and configuration metadata
pub mod build_info {
    /// Returns the configuration profile used during build
    pub fn profile() -> &'static str {
        option_env!("VERO_BUILD_PROFILE").unwrap_or("development")
    }

    /// Returns the configuration directory used during build
    pub fn config_dir() -> &'static str {
        option_env!("VERO_CONFIG_DIR").unwrap_or("config")
    }

    /// Returns configuration source information
    pub fn source_info() -> String {
        format!("Generated from {}/{}.toml", config_dir(), profile())
    }
}

#[cfg(test)]
mod tests {
    use super::compile_time;

    #[test]
    fn test_compile_time_constants() {
        assert!(compile_time::source_map::MAX_ENTRIES > 0);
        assert!(compile_time::mapper::MAX_STACK_BYTES >= 1024);
        assert!(compile_time::mapper::MAX_BATCH_ERRORS > 0);
        assert!(compile_time::report::MAX_DIAGNOSTICS_PER_SCRIPT > 0);
        assert!(compile_time::logging::LOG_BUFFER_SIZE >= 100);
    }

    #[test]
    fn test_source_info_names_profile() {
        assert!(super::build_info::source_info().ends_with(".toml"));
    }
}
