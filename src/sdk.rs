use std::env;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

pub const DEFAULT_SDK_VERSION: &str = "1.3.204.1";
pub const DEFAULT_SDK_DIR: &str = "vendor/VulkanSDK";
pub const DEFAULT_SDK_ENV: &str = "VULKAN_SDK";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Platform {
    Windows,
    Linux,
    Other,
}

impl Platform {
    pub fn current() -> Platform {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "linux") {
            Platform::Linux
        } else {
            Platform::Other
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Platform::Windows => write!(f, "Windows"),
            Platform::Linux => write!(f, "Linux"),
            Platform::Other => write!(f, "{}", env::consts::OS),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SdkConfiguration {
    pub version: String,
    pub local_dir: PathBuf,
    pub env_var: String,
    /// Reject an SDK whose root path does not mention `version`.
    pub require_version_in_path: bool,
}

impl Default for SdkConfiguration {
    fn default() -> Self {
        Self {
            version: DEFAULT_SDK_VERSION.to_string(),
            local_dir: PathBuf::from(DEFAULT_SDK_DIR),
            env_var: DEFAULT_SDK_ENV.to_string(),
            require_version_in_path: false,
        }
    }
}

impl SdkConfiguration {
    pub fn installer_url(&self, platform: Platform) -> Option<String> {
        let version = &self.version;
        match platform {
            Platform::Windows => Some(format!(
                "https://sdk.lunarg.com/sdk/download/{version}/windows/VulkanSDK-{version}-Installer.exe"
            )),
            Platform::Linux => Some(format!(
                "https://sdk.lunarg.com/sdk/download/{version}/linux/vulkansdk-linux-x86_64-{version}.tar.gz"
            )),
            Platform::Other => None,
        }
    }

    /// Where the downloaded installer is stored inside `local_dir`.
    pub fn installer_path(&self, platform: Platform) -> Option<PathBuf> {
        match platform {
            Platform::Windows => Some(self.local_dir.join("VulkanSDK.exe")),
            Platform::Linux => Some(self.local_dir.join(format!("vulkansdk-linux-x86_64-{}.tar.gz", self.version))),
            Platform::Other => None,
        }
    }

    /// Value of the SDK environment variable, if set and not blank.
    pub fn sdk_root_from_env(&self) -> Option<String> {
        env::var(&self.env_var).ok().filter(|value| !value.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SdkStatus {
    Missing,
    WrongVersion(PathBuf),
    Found(PathBuf),
}

pub fn check_sdk(config: &SdkConfiguration, sdk_root: Option<&str>) -> SdkStatus {
    let sdk_root = match sdk_root {
        Some(root) => root,
        None => return SdkStatus::Missing,
    };

    if config.require_version_in_path && !sdk_root.contains(config.version.as_str()) {
        return SdkStatus::WrongVersion(PathBuf::from(sdk_root));
    }

    SdkStatus::Found(PathBuf::from(sdk_root))
}

pub fn debug_libs_path(sdk_root: &Path, platform: Platform) -> Option<PathBuf> {
    match platform {
        Platform::Windows => Some(sdk_root.join("Lib").join("shaderc_sharedd.lib")),
        Platform::Linux => Some(sdk_root.join("lib").join("libshaderc_shared.so")),
        Platform::Other => None,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DebugLibsStatus {
    Found(PathBuf),
    Missing(PathBuf),
    Unsupported(Platform),
}

pub fn check_debug_libs(sdk_root: &Path, platform: Platform) -> DebugLibsStatus {
    match debug_libs_path(sdk_root, platform) {
        Some(path) if path.exists() => DebugLibsStatus::Found(path),
        Some(path) => DebugLibsStatus::Missing(path),
        None => DebugLibsStatus::Unsupported(platform),
    }
}

#[cfg(test)]
mod test {
    use std::path::{Path, PathBuf};
    use crate::sdk::*;

    #[test]
    fn test_check_sdk() {
        let config = SdkConfiguration::default();
        assert_eq!(check_sdk(&config, None), SdkStatus::Missing);
        assert_eq!(check_sdk(&config, Some("/opt/vulkan")), SdkStatus::Found(PathBuf::from("/opt/vulkan")));
    }

    #[test]
    fn test_check_sdk_strict_version() {
        let config = SdkConfiguration {
            require_version_in_path: true,
            ..SdkConfiguration::default()
        };
        assert_eq!(
            check_sdk(&config, Some("C:\\VulkanSDK\\1.2.198.1")),
            SdkStatus::WrongVersion(PathBuf::from("C:\\VulkanSDK\\1.2.198.1"))
        );
        assert_eq!(
            check_sdk(&config, Some("C:\\VulkanSDK\\1.3.204.1")),
            SdkStatus::Found(PathBuf::from("C:\\VulkanSDK\\1.3.204.1"))
        );
    }

    #[test]
    fn test_installer_location() {
        let config = SdkConfiguration::default();
        assert_eq!(
            config.installer_url(Platform::Windows).unwrap(),
            "https://sdk.lunarg.com/sdk/download/1.3.204.1/windows/VulkanSDK-1.3.204.1-Installer.exe"
        );
        assert_eq!(
            config.installer_url(Platform::Linux).unwrap(),
            "https://sdk.lunarg.com/sdk/download/1.3.204.1/linux/vulkansdk-linux-x86_64-1.3.204.1.tar.gz"
        );
        assert_eq!(config.installer_url(Platform::Other), None);
        assert_eq!(
            config.installer_path(Platform::Linux).unwrap(),
            Path::new("vendor/VulkanSDK").join("vulkansdk-linux-x86_64-1.3.204.1.tar.gz")
        );
        assert_eq!(config.installer_path(Platform::Windows).unwrap(), Path::new("vendor/VulkanSDK").join("VulkanSDK.exe"));
    }

    #[test]
    fn test_check_debug_libs() {
        let dir = tempfile::tempdir().unwrap();
        let expected = dir.path().join("lib").join("libshaderc_shared.so");
        assert_eq!(check_debug_libs(dir.path(), Platform::Linux), DebugLibsStatus::Missing(expected.clone()));

        std::fs::create_dir_all(expected.parent().unwrap()).unwrap();
        std::fs::write(&expected, b"").unwrap();
        assert_eq!(check_debug_libs(dir.path(), Platform::Linux), DebugLibsStatus::Found(expected));
        assert_eq!(check_debug_libs(dir.path(), Platform::Other), DebugLibsStatus::Unsupported(Platform::Other));
    }
}
