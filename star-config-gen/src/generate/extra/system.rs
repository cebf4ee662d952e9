use ros_script_core::{Command, RouterConfig};

use crate::error::GeneratorError;
use crate::model::{ExtraConfigState, Schedule, ServiceState, Services};

const IDENTITY_SECTION: &str = "/system identity";
const CLOCK_SECTION: &str = "/system clock";
const NTP_SECTION: &str = "/system ntp client";
const DNS_SECTION: &str = "/ip dns";
const CLOUD_SECTION: &str = "/ip cloud";
const SERVICE_SECTION: &str = "/ip service";
const SCHEDULER_SECTION: &str = "/system scheduler";
const ROUTERBOARD_SECTION: &str = "/system routerboard settings";
const ROMON_SECTION: &str = "/tool romon";
const GRAPHING_INTERFACE_SECTION: &str = "/tool graphing interface";
const GRAPHING_RESOURCE_SECTION: &str = "/tool graphing resource";

/// Address ranges a `Local` service stays reachable from.
const PRIVATE_RANGES: &str = "192.168.0.0/16,172.16.0.0/12,10.0.0.0/8";

const REBOOT_SCRIPT: &str = "/system reboot";
const UPDATE_SCRIPT: &str =
    "/system package update check-for-updates once; :delay 5s; /system package update install";

pub fn identity(config: &mut RouterConfig, extra: &ExtraConfigState) {
    if let Some(name) = extra
        .router_identity
        .as_deref()
        .map(str::trim)
        .filter(|n| !n.is_empty())
    {
        config.push(IDENTITY_SECTION, Command::set_global().quoted("name", name));
    }
}

pub fn clock_and_ntp(config: &mut RouterConfig, extra: &ExtraConfigState) {
    if let Some(tz) = extra.timezone.as_deref().filter(|t| !t.is_empty()) {
        config.push(
            CLOCK_SECTION,
            Command::set_global()
                .flag("time-zone-autodetect", false)
                .attr("time-zone-name", tz),
        );
    }
    if !extra.ntp_servers.is_empty() {
        config.push(
            NTP_SECTION,
            Command::set_global()
                .flag("enabled", true)
                .attr("servers", extra.ntp_servers.join(",")),
        );
    }
}

pub fn dns_and_cloud(config: &mut RouterConfig, extra: &ExtraConfigState) {
    if !extra.dns_servers.is_empty() {
        config.push(
            DNS_SECTION,
            Command::set_global()
                .attr("servers", extra.dns_servers.join(","))
                .flag("allow-remote-requests", true),
        );
    }
    if extra.ddns {
        config.push(
            CLOUD_SECTION,
            Command::set_global()
                .flag("ddns-enabled", true)
                .attr("ddns-update-interval", "1m"),
        );
    }
}

/// `/ip service set` for every service with a desired state.
pub fn services(config: &mut RouterConfig, services: &Services) {
    for (name, state) in services.entries() {
        let Some(state) = state else {
            continue;
        };
        let command = Command::set(name);
        let command = match state {
            ServiceState::Enable => command.flag("disabled", false),
            ServiceState::Disable => command.flag("disabled", true),
            ServiceState::Local => command
                .flag("disabled", false)
                .attr("address", PRIVATE_RANGES),
        };
        config.push(SERVICE_SECTION, command);
    }
}

fn start_time(schedule: &Schedule, context: &'static str) -> Result<String, GeneratorError> {
    if schedule.hour > 23 || schedule.minute > 59 {
        return Err(GeneratorError::InvalidSchedule {
            context,
            hour: schedule.hour,
            minute: schedule.minute,
        });
    }
    Ok(format!("{:02}:{:02}:00", schedule.hour, schedule.minute))
}

/// Scheduled reboot and package update jobs.
pub fn schedules(
    config: &mut RouterConfig,
    extra: &ExtraConfigState,
) -> Result<(), GeneratorError> {
    let jobs = [
        ("reboot", extra.auto_reboot.as_ref(), REBOOT_SCRIPT, "Scheduled reboot"),
        ("update", extra.update.as_ref(), UPDATE_SCRIPT, "Scheduled update"),
    ];
    for (name, schedule, script, comment) in jobs {
        let Some(schedule) = schedule else {
            continue;
        };
        config.push(
            SCHEDULER_SECTION,
            Command::add()
                .attr("name", name)
                .attr("start-time", start_time(schedule, name)?)
                .attr("interval", schedule.interval.as_routeros())
                .quoted("on-event", script)
                .attr("policy", "read,write,policy,test,reboot")
                .quoted("comment", comment),
        );
    }
    Ok(())
}

/// Routerboard firmware upgrade, RoMON and graphing toggles.
pub fn tools(config: &mut RouterConfig, extra: &ExtraConfigState) {
    if extra.auto_upgrade {
        config.push(
            ROUTERBOARD_SECTION,
            Command::set_global().flag("auto-upgrade", true),
        );
    }
    if extra.romon {
        config.push(ROMON_SECTION, Command::set_global().flag("enabled", true));
    }
    if extra.graphing {
        config.push(
            GRAPHING_INTERFACE_SECTION,
            Command::add().attr("interface", "all"),
        );
        config.push(GRAPHING_RESOURCE_SECTION, Command::add());
    }
}
