//! Best-effort device capability signals. Every method may return `None`;
//! callers treat that as "capable".

use crate::level::NetworkClass;

pub trait DeviceProbe {
    fn device_memory_gb(&self) -> Option<f64>;
    fn logical_cores(&self) -> Option<u32>;
    /// Effective connection type string, e.g. `"4g"` or `"slow-2g"`.
    fn network_class(&self) -> Option<String>;
    fn prefers_reduced_motion(&self) -> Option<bool> {
        None
    }
}

/// Fixed answers, for tests and for hosts that report signals up front.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct StaticProbe {
    pub memory_gb: Option<f64>,
    pub cores: Option<u32>,
    pub network: Option<String>,
    pub reduced_motion: Option<bool>,
}

impl DeviceProbe for StaticProbe {
    fn device_memory_gb(&self) -> Option<f64> {
        self.memory_gb
    }

    fn logical_cores(&self) -> Option<u32> {
        self.cores
    }

    fn network_class(&self) -> Option<String> {
        self.network.clone()
    }

    fn prefers_reduced_motion(&self) -> Option<bool> {
        self.reduced_motion
    }
}

/// Reads the native host. Connection type is not observable here, so it
/// comes from the caller.
#[derive(Clone, Debug, Default)]
pub struct SystemProbe {
    pub network: Option<String>,
}

impl DeviceProbe for SystemProbe {
    fn device_memory_gb(&self) -> Option<f64> {
        let mut sys = sysinfo::System::new();
        sys.refresh_memory();
        let bytes = sys.total_memory();
        if bytes == 0 {
            tracing::debug!("probe: total memory unavailable");
            return None;
        }
        Some(bytes as f64 / (1024.0 * 1024.0 * 1024.0))
    }

    fn logical_cores(&self) -> Option<u32> {
        u32::try_from(num_cpus::get()).ok().filter(|n| *n > 0)
    }

    fn network_class(&self) -> Option<String> {
        self.network.clone()
    }
}

/// Snapshot of what the probe reported, taken once at startup.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize)]
pub struct DeviceClass {
    pub memory_gb: Option<f64>,
    pub cores: Option<u32>,
    pub network: Option<NetworkClass>,
    pub is_low_end: bool,
}

impl DeviceClass {
    /// Low end when memory is at most 4 GB, there are at most 2 cores, or
    /// the connection is 2g or slower. Missing signals count as capable.
    pub fn detect(probe: &dyn DeviceProbe) -> Self {
        let memory_gb = probe.device_memory_gb();
        let cores = probe.logical_cores();
        let network = probe
            .network_class()
            .as_deref()
            .and_then(NetworkClass::from_effective_type);
        let is_low_end = memory_gb.is_some_and(|m| m <= 4.0)
            || cores.is_some_and(|c| c <= 2)
            || network.is_some_and(NetworkClass::is_slow);
        Self {
            memory_gb,
            cores,
            network,
            is_low_end,
        }
    }
}
