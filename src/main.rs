//! Keyboard backlight CLI tool for the Gigabyte Aorus 15P.
//!
//! The backlight is controlled through a 9 byte HID feature report on the keyboard's vendor
//! interface. The last applied setting is persisted, so changing only the color or only the
//! brightness keeps the other value.

use std::path::PathBuf;
use std::process;

use clap::builder::EnumValueParser;
use clap::{
    crate_description, crate_name, crate_version, Arg, ArgAction, ArgMatches, Command, ValueEnum,
};
use log::{debug, info, warn};

use crate::aorus_15p::Aorus15P;
use crate::color::Color;
use crate::controller::HidController;
use crate::error::Result;
use crate::hidraw::{FeatureReport, Hidraw};
use crate::setting::{Brightness, DeviceSetting};
use crate::state::{FileStore, SettingStore};

mod aorus_15p;
mod color;
mod controller;
mod error;
mod hidraw;
mod setting;
mod state;

/// Hint printed when the keyboard could not be updated.
const FAILURE_HINT: &str = "Failed. Try running as root or check udev rules.";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .format_target(false)
        .init();

    let matches = match cli().try_get_matches() {
        Ok(matches) => matches,
        Err(err) => {
            // Help and version go to STDOUT and are not failures.
            let code = if err.use_stderr() { 1 } else { 0 };
            let _ = err.print();
            process::exit(code);
        },
    };

    if matches.get_flag("list") {
        for color in Color::value_variants() {
            println!("{}", color);
        }
        return;
    }

    let store = FileStore::from_env();
    debug!("Backlight state file: {}", store.path().display());
    let setting = setting_from_cli(store.load(), &matches);
    let hidraw: Hidraw = Hidraw::default();

    match write_setting(&setting, &Aorus15P, &hidraw, &store) {
        Ok(_) => println!("OK: color={} brightness={}%", setting.color, setting.brightness),
        Err(err) => {
            info!("Unable to apply {:?}: {}", setting, err);
            eprintln!("{}", FAILURE_HINT);
            process::exit(1);
        },
    }
}

/// Merge CLI overrides onto the previously applied setting.
fn setting_from_cli(mut setting: DeviceSetting, matches: &ArgMatches) -> DeviceSetting {
    replace_from_cli(&mut setting.color, matches, "color");
    replace_from_cli(&mut setting.brightness, matches, "brightness");
    setting
}

/// Replace setting value with the CLI parameter if it is present.
#[inline]
fn replace_from_cli<T>(option: &mut T, matches: &ArgMatches, name: &str)
where
    T: Copy + Send + Sync + 'static,
{
    if let Some(value) = matches.get_one::<T>(name) {
        *option = *value;
    }
}

/// Write a setting to the keyboard and persist it.
///
/// The setting is only persisted once the keyboard accepted it. Persistence is best-effort: a
/// failure to save does not undo the applied backlight, so it is logged and discarded.
fn write_setting<F: FeatureReport>(
    setting: &DeviceSetting,
    controller: &dyn HidController,
    hidraw: &Hidraw<F>,
    store: &dyn SettingStore,
) -> Result<PathBuf> {
    let packet = controller.config_bytes(setting);
    let node = hidraw.send(controller, &packet)?;

    if let Err(err) = store.save(setting) {
        warn!("Unable to save backlight state: {}", err);
    }

    Ok(node)
}

/// Get clap CLI parameters.
fn cli() -> Command {
    Command::new(crate_name!())
        .version(crate_version!())
        .about(crate_description!())
        .arg_required_else_help(true)
        .arg(
            Arg::new("color")
                .help("Backlight color")
                .long("color")
                .short('c')
                .value_parser(EnumValueParser::<Color>::new()),
        )
        .arg(
            Arg::new("brightness")
                .help("Backlight brightness in percent [possible values: 0..=100]")
                .long("brightness")
                .short('b')
                .allow_negative_numbers(true)
                .value_parser(|value: &str| value.parse::<Brightness>()),
        )
        .arg(
            Arg::new("list")
                .help("List available colors")
                .long("list")
                .action(ArgAction::SetTrue)
                .conflicts_with_all(["color", "brightness"]),
        )
}
