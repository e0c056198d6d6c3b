//! Default-route interface, address and link speed.
//!
//! With several default routes or several addresses on the interface, the
//! last matching `ip route` line wins.

use std::fs;
use std::path::{Path, PathBuf};

use super::MetricSource;
use crate::error::Result;
use crate::platform::command;
use crate::ui::markup::Markup;

const SYS_CLASS_NET: &str = "/sys/class/net";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultRoute {
    pub dev: String,
    pub src: Option<String>,
}

/// Value following `key` among whitespace-separated tokens
fn token_after<'a>(line: &'a str, key: &str) -> Option<&'a str> {
    let mut tokens = line.split_whitespace();
    while let Some(tok) = tokens.next() {
        if tok == key {
            return tokens.next();
        }
    }
    None
}

/// Interface and source address of the default route from `ip route` output.
///
/// The address comes from the `src` of the last route through that device,
/// which for most setups is the kernel's link route.
pub fn parse_default_route(output: &str) -> Option<DefaultRoute> {
    let dev = output
        .lines()
        .filter(|l| l.trim_start().starts_with("default"))
        .filter_map(|l| token_after(l, "dev"))
        .last()?
        .to_string();

    let src = output
        .lines()
        .filter(|l| token_after(l, "dev") == Some(dev.as_str()))
        .filter_map(|l| token_after(l, "src"))
        .last()
        .map(str::to_string);

    Some(DefaultRoute { dev, src })
}

/// Link speed in Mb/s, if the interface reports a positive one.
pub fn read_link_speed(sys_net: &Path, dev: &str) -> Option<u32> {
    let raw = fs::read_to_string(sys_net.join(dev).join("speed")).ok()?;
    raw.trim().parse::<i64>().ok().filter(|s| *s > 0)?.try_into().ok()
}

pub fn format_route(route: &DefaultRoute, speed: Option<u32>) -> String {
    let addr = route.src.as_deref().unwrap_or(&route.dev);
    match (speed, &route.src) {
        (Some(s), Some(_)) => format!("{} ({}, {}Mb/s)", addr, route.dev, s),
        (Some(s), None) => format!("{} ({}Mb/s)", addr, s),
        (None, Some(_)) => format!("{} ({})", addr, route.dev),
        (None, None) => addr.to_string(),
    }
}

pub struct NetworkSource {
    sys_net: PathBuf,
    markup: Markup,
}

impl NetworkSource {
    pub fn new(markup: Markup) -> Self {
        Self {
            sys_net: PathBuf::from(SYS_CLASS_NET),
            markup,
        }
    }
}

impl MetricSource for NetworkSource {
    fn name(&self) -> &str {
        "network"
    }

    fn label(&self) -> Option<&str> {
        Some("NET")
    }

    fn query(&self) -> Result<String> {
        let routes = command::run("ip", &["route"])?;
        match parse_default_route(&routes) {
            Some(route) => {
                let speed = read_link_speed(&self.sys_net, &route.dev);
                Ok(self.markup.text(&format_route(&route, speed)))
            }
            None => Ok(self.markup.critical("offline")),
        }
    }
}
