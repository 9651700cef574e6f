use std::ffi::OsStr;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use sysinfo::{Pid, ProcessRefreshKind, ProcessesToUpdate, System, UpdateKind};

use crate::global_constants::LOCK_FILE_NAME;

pub fn lock_file_path() -> PathBuf {
    std::env::temp_dir().join(LOCK_FILE_NAME)
}

/// Terminates a previous live instance so only one global hotkey listener exists.
pub fn ensure_single_instance(lock_file_path: &Path) -> bool {
    if let Some(pid) = read_lock_owner(lock_file_path) {
        log::info!("[INSTANCE] Found existing instance with PID: {}", pid);

        if pid != std::process::id() {
            let mut system = System::new();
            system.refresh_processes_specifics(
                ProcessesToUpdate::Some(&[Pid::from_u32(pid)]),
                true,
                ProcessRefreshKind::nothing().with_exe(UpdateKind::Always),
            );

            if let Some(process) = system.process(Pid::from_u32(pid)) {
                let own_exe = std::env::current_exe().unwrap_or_default();
                if is_same_program(process.exe(), process.name(), &own_exe) {
                    log::warn!("[INSTANCE] Killing existing instance (PID: {})", pid);
                    process.kill();
                    std::thread::sleep(std::time::Duration::from_millis(500));
                } else {
                    log::info!(
                        "[INSTANCE] PID {} now belongs to {:?}, leaving it running",
                        pid,
                        process.name()
                    );
                }
            } else {
                log::info!(
                    "[INSTANCE] Previous instance (PID: {}) is not running, cleaning up stale lock file",
                    pid
                );
            }
        }

        let _ = fs::remove_file(lock_file_path);
    }

    let current_pid = std::process::id();
    if let Err(e) = fs::File::create(lock_file_path)
        .and_then(|mut file| file.write_all(current_pid.to_string().as_bytes()))
    {
        log::error!("[INSTANCE] Failed to create lock file: {}", e);
        return false;
    }

    log::info!("[INSTANCE] Created lock file with PID: {}", current_pid);
    true
}

/// Removes the lock file if this process still owns it.
pub fn release_single_instance(lock_file_path: &Path) {
    if read_lock_owner(lock_file_path) == Some(std::process::id()) {
        match fs::remove_file(lock_file_path) {
            Ok(()) => log::info!("[INSTANCE] Released lock file"),
            Err(e) => log::warn!("[INSTANCE] Failed to remove lock file: {}", e),
        }
    }
}

/// Falls back to the process name only when its executable path is unreadable.
fn is_same_program(process_exe: Option<&Path>, process_name: &OsStr, own_exe: &Path) -> bool {
    match process_exe {
        Some(exe) => canonical(exe) == canonical(own_exe),
        None => own_exe.file_name() == Some(process_name),
    }
}

fn canonical(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}

fn read_lock_owner(lock_file_path: &Path) -> Option<u32> {
    fs::read_to_string(lock_file_path)
        .ok()
        .and_then(|pid_string| pid_string.trim().parse::<u32>().ok())
}
