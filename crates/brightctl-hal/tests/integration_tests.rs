//! Integration tests for the sysfs-backed brightness controller

use brightctl_hal::{BacklightControl, BacklightError, StateStore};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const TEST_DEVICE: &str = "bl_device";

/// Fake sysfs class directory plus a state root
struct BacklightTestEnv {
    #[allow(dead_code)]
    temp_dir: TempDir,
    sysfs_dir: PathBuf,
    state_root: PathBuf,
    device_dir: PathBuf,
}

impl BacklightTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let sysfs_dir = temp_dir.path().join("backlight");
        let state_root = temp_dir.path().join("state");
        let device_dir = sysfs_dir.join(TEST_DEVICE);

        fs::create_dir_all(&device_dir).unwrap();

        Self {
            temp_dir,
            sysfs_dir,
            state_root,
            device_dir,
        }
    }

    fn with_device(current: u32, max: u32) -> Self {
        let env = Self::new();
        env.write_attr("brightness", &current.to_string());
        env.write_attr("max_brightness", &max.to_string());
        env
    }

    fn write_attr(&self, name: &str, contents: &str) {
        fs::write(self.device_dir.join(name), contents).unwrap();
    }

    fn brightness(&self) -> u32 {
        fs::read_to_string(self.device_dir.join("brightness"))
            .unwrap()
            .trim()
            .parse()
            .unwrap()
    }

    fn state(&self) -> StateStore {
        StateStore::new(&self.state_root)
    }

    fn open(&self) -> BacklightControl<brightctl_hal::FileStore> {
        BacklightControl::open(&self.sysfs_dir, Some(&self.state_root)).unwrap()
    }
}

#[test]
fn test_open_reads_device() {
    let env = BacklightTestEnv::with_device(20, 100);
    let control = env.open();

    let backlight = control.backlight();
    assert_eq!(backlight.name(), TEST_DEVICE);
    assert_eq!(backlight.current(), 20);
    assert_eq!(backlight.max(), 100);
}

#[test]
fn test_set_writes_brightness_and_state() {
    let env = BacklightTestEnv::with_device(20, 100);
    let mut control = env.open();

    assert_eq!(control.set("50%").unwrap(), 50);
    assert_eq!(env.brightness(), 50);
    assert_eq!(env.state().load().unwrap(), 50);

    assert_eq!(control.set("-5%").unwrap(), 45);
    assert_eq!(env.brightness(), 45);
    assert_eq!(env.state().load().unwrap(), 45);

    let raw = fs::read_to_string(env.device_dir.join("brightness")).unwrap();
    assert_eq!(raw, "45");
}

#[test]
fn test_set_rejected_leaves_files_alone() {
    let env = BacklightTestEnv::with_device(20, 100);
    let mut control = env.open();

    for expr in ["5000%", "+5000%", "50000", "+50000"] {
        assert!(matches!(control.set(expr), Err(BacklightError::OutOfRange)));
    }
    assert!(matches!(
        control.set("bright"),
        Err(BacklightError::InvalidArgument(_))
    ));

    assert_eq!(env.brightness(), 20);
    assert!(!env.state().path().exists());
}

#[test]
fn test_get_reads_current_attribute() {
    let env = BacklightTestEnv::with_device(25, 100);
    let mut control = env.open();
    assert_eq!(control.get().unwrap(), 0.25);

    // Something else changed the level after the device was opened
    env.write_attr("brightness", "259");
    env.write_attr("max_brightness", "1000");
    assert_eq!(control.get().unwrap(), 1.0);

    let env = BacklightTestEnv::with_device(259, 1000);
    assert_eq!(env.open().get().unwrap(), 0.25);
}

#[test]
fn test_get_corrupt_attribute() {
    let env = BacklightTestEnv::with_device(25, 100);
    let mut control = env.open();

    env.write_attr("brightness", "dim");
    let err = control.get().unwrap_err();
    assert!(matches!(err, BacklightError::CorruptValue { .. }));
}

#[test]
fn test_restore_rewrites_brightness() {
    let env = BacklightTestEnv::with_device(20, 100);
    env.state().save(100).unwrap();

    let mut control = env.open();
    assert_eq!(control.restore().unwrap(), 100);
    assert_eq!(env.brightness(), 100);
}

#[test]
fn test_set_then_restore_after_power_cycle() {
    let env = BacklightTestEnv::with_device(20, 100);
    env.open().set("70%").unwrap();

    // Panel comes back at full brightness
    env.write_attr("brightness", "100");

    env.open().restore().unwrap();
    assert_eq!(env.brightness(), 70);
}

#[test]
fn test_restore_without_saved_state() {
    let env = BacklightTestEnv::with_device(20, 100);
    let mut control = env.open();

    let err = control.restore().unwrap_err();
    assert_eq!(err.to_string(), "no saved brightness found");
    assert_eq!(env.brightness(), 20);
}

#[test]
fn test_set_without_state_root() {
    let env = BacklightTestEnv::with_device(20, 100);
    let mut control = BacklightControl::open(&env.sysfs_dir, None).unwrap();

    assert_eq!(control.set("+0.05").unwrap(), 25);
    assert_eq!(env.brightness(), 25);
    assert!(!env.state_root.exists());
}

#[test]
fn test_brightness_attribute_removed() {
    let env = BacklightTestEnv::with_device(20, 100);
    let mut control = env.open();

    fs::remove_file(env.device_dir.join("brightness")).unwrap();
    assert!(matches!(control.set("10%"), Err(BacklightError::Io { .. })));
}

#[test]
fn test_open_empty_class_dir() {
    let temp_dir = TempDir::new().unwrap();

    let err = BacklightControl::open(temp_dir.path(), None).err().unwrap();
    assert!(matches!(err, BacklightError::DeviceNotFound { .. }));
    assert!(err.to_string().contains("no backlight device found"));
}

#[test]
fn test_open_missing_class_dir() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("backlight");

    let err = BacklightControl::open(&missing, None).err().unwrap();
    assert!(matches!(err, BacklightError::ListFailed { .. }));
    assert!(err.to_string().contains("failed to list"));
}

#[test]
fn test_open_corrupt_max_brightness() {
    let env = BacklightTestEnv::new();
    env.write_attr("brightness", "20");
    env.write_attr("max_brightness", "n/a");

    let err = BacklightControl::open(&env.sysfs_dir, None).err().unwrap();
    assert!(matches!(err, BacklightError::CorruptValue { .. }));
}

#[test]
fn test_open_zero_max_brightness() {
    let env = BacklightTestEnv::with_device(0, 0);

    let err = BacklightControl::open(&env.sysfs_dir, None).err().unwrap();
    assert!(matches!(err, BacklightError::ZeroMaximum { .. }));
}
