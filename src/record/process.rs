//! Process context captured once per logger.
//!
//! Detection is platform-specific and never fails: anything that can't be
//! read falls back to an empty/zero value.

/// Host, pid and uid of the running process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessContext {
    pub host: String,
    pub process_id: u32,
    pub user_id: String,
}

impl ProcessContext {
    /// Capture the current process.
    pub fn detect() -> Self {
        let host = hostname::get()
            .map(|h| h.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self {
            host,
            process_id: std::process::id(),
            user_id: detect_uid(),
        }
    }
}

/// Peak resident memory of this process in KiB.
#[cfg(target_os = "linux")]
pub fn peak_memory_kb() -> u64 {
    proc_status_field("VmHWM:")
        .and_then(|value| value.parse::<u64>().ok())
        .unwrap_or(0)
}

/// `ru_maxrss` is reported in bytes on macOS.
#[cfg(target_os = "macos")]
pub fn peak_memory_kb() -> u64 {
    let mut usage = std::mem::MaybeUninit::<libc::rusage>::zeroed();
    // SAFETY: getrusage only writes into the provided struct.
    let rc = unsafe { libc::getrusage(libc::RUSAGE_SELF, usage.as_mut_ptr()) };
    if rc != 0 {
        return 0;
    }
    // SAFETY: zero-initialized and filled by a successful getrusage.
    let usage = unsafe { usage.assume_init() };
    u64::try_from(usage.ru_maxrss).unwrap_or(0) / 1024
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
pub fn peak_memory_kb() -> u64 {
    0
}

#[cfg(target_os = "linux")]
fn detect_uid() -> String {
    proc_status_field("Uid:").unwrap_or_default()
}

#[cfg(target_os = "macos")]
fn detect_uid() -> String {
    // SAFETY: getuid has no preconditions and cannot fail.
    unsafe { libc::getuid() }.to_string()
}

#[cfg(not(any(target_os = "linux", target_os = "macos")))]
fn detect_uid() -> String {
    std::env::var("USERNAME")
        .or_else(|_| std::env::var("USER"))
        .unwrap_or_default()
}

/// First whitespace-separated value of a `/proc/self/status` line.
#[cfg(target_os = "linux")]
fn proc_status_field(prefix: &str) -> Option<String> {
    std::fs::read_to_string("/proc/self/status")
        .ok()
        .and_then(|content| {
            content
                .lines()
                .find(|line| line.starts_with(prefix))
                .and_then(|line| line.split_whitespace().nth(1).map(str::to_string))
        })
}
