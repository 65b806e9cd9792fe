//! Banner — start, reload, and summary blocks on stdout.

use std::collections::BTreeMap;

use chrono::{DateTime, Local};

const RULE_WIDTH: usize = 140;
const TIME_FORMAT: &str = "%I:%M%p %Z on %b %d, %Y";

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

fn json_list(items: &[String]) -> String {
    serde_json::to_string(items).unwrap_or_default()
}

pub fn start(
    token_files: &[String],
    num_tokens: usize,
    device: &str,
    pass_filter: &[String],
    start_time: DateTime<Local>,
) {
    println!("{}", rule());
    println!("token_file  = {} ({} tokens)", json_list(token_files), num_tokens);
    println!("serial_dev  = {}", device);
    if pass_filter.is_empty() {
        println!("pass_filter = <all>");
    } else {
        println!("pass_filter = {}", json_list(pass_filter));
    }
    println!("start_time  = {}", start_time.format(TIME_FORMAT));
    println!("{}", rule());
}

pub fn reload(token_files: &[String], num_tokens: usize, reset_time: DateTime<Local>) {
    println!("{}", rule());
    println!("token_file  = {} ({} tokens)", json_list(token_files), num_tokens);
    println!("reset_time  = {}", reset_time.format(TIME_FORMAT));
    println!("{}", rule());
}

pub fn summary(
    severity_counts: &BTreeMap<String, u64>,
    num_filtered: u64,
    start_time: DateTime<Local>,
    finish_time: DateTime<Local>,
) {
    println!("{}", rule());
    println!(
        "trace_stats  = {}",
        serde_json::to_string(severity_counts).unwrap_or_default()
    );
    println!("num_filtered = {}", num_filtered);
    println!("start_time   = {}", start_time.format(TIME_FORMAT));
    println!("finish_time  = {}", finish_time.format(TIME_FORMAT));
    println!("{}", rule());
}
