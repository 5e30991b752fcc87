use anyhow::Result;
use gpusmi_types::{
    Compatibility, Destination, DeviceHandle, DeviceResolver, OutputFormat, ValueMap, WatchSample,
};
use serde_json::Value;

use crate::flatten::flatten;
use crate::formatters::{csv, json};
use crate::humanize;
use crate::sink;

/// Accumulates per-device records and renders them in the configured
/// format, compatibility mode, and destination.
///
/// Three accumulation tracks, owned by one caller at a time:
/// - the current record, mutated in place across `store` calls for one device
/// - the multi-device list, fed by `capture_device`
/// - the watch history, fed by `capture_sample` and written out once by
///   `flush_watch`
pub struct ReportSession {
    compatibility: Compatibility,
    format: OutputFormat,
    destination: Destination,
    resolver: Box<dyn DeviceResolver>,
    output: ValueMap,
    multi_device_output: Vec<ValueMap>,
    watch_output: Vec<WatchSample>,
}

impl ReportSession {
    pub fn new(
        compatibility: Compatibility,
        format: OutputFormat,
        destination: Destination,
        resolver: Box<dyn DeviceResolver>,
    ) -> Self {
        ReportSession {
            compatibility,
            format,
            destination,
            resolver,
            output: ValueMap::new(),
            multi_device_output: Vec::new(),
            watch_output: Vec::new(),
        }
    }

    pub fn compatibility(&self) -> Compatibility {
        self.compatibility
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// The in-progress record for the device currently being queried.
    pub fn output(&self) -> &ValueMap {
        &self.output
    }

    pub fn multi_device_output(&self) -> &[ValueMap] {
        &self.multi_device_output
    }

    pub fn watch_history(&self) -> &[WatchSample] {
        &self.watch_output
    }

    /// Merge `data` under `key` into the current record for the device
    /// behind `handle`, applying the active compatibility mode's rules.
    /// The record always carries `"gpu"` bound to the resolved device id.
    pub fn store(&mut self, handle: DeviceHandle, key: &str, data: Value) {
        let gpu_id = self.resolver.gpu_id(handle);
        self.output.insert("gpu".to_string(), Value::from(gpu_id));

        match self.compatibility {
            Compatibility::AmdSmi => self.store_base(key, data),
            // Reserved dialect: accepted for every format, no extra shaping yet.
            Compatibility::RocmSmi => {}
            Compatibility::GpuvSmi => {
                self.store_base(key, data);
                self.apply_gpuv_rewrites();
            }
        }
    }

    fn store_base(&mut self, key: &str, data: Value) {
        match self.format {
            OutputFormat::Json | OutputFormat::HumanReadable => {
                if key == "values" {
                    if let Value::Object(entries) = data {
                        for (entry_key, entry_value) in entries {
                            self.output.insert(entry_key, entry_value);
                        }
                        return;
                    }
                }
                self.output.insert(key.to_string(), data);
            }
            OutputFormat::Csv => {
                // Tabular rows are scalar-only: map payloads go through the
                // flattening engine before merging.
                if let Value::Object(entries) = data {
                    for (flat_key, flat_value) in flatten(&entries, self.compatibility) {
                        self.output.insert(flat_key, flat_value);
                    }
                } else {
                    self.output.insert(key.to_string(), data);
                }
            }
        }
    }

    /// Post-process pass over the whole accumulated record, run after every
    /// gpuvsmi store. Idempotent: strings that already read `N/A` and keys
    /// already renamed pass through unchanged.
    fn apply_gpuv_rewrites(&mut self) {
        self.output = gpuv_rewrite_map(&self.output);
    }

    /// Move the current record into the multi-device list and start a fresh
    /// one. No-op when nothing has been stored yet.
    pub fn capture_device(&mut self) {
        if self.output.is_empty() {
            return;
        }
        self.multi_device_output.push(std::mem::take(&mut self.output));
    }

    /// Append a timestamped sample of the current record (or of the whole
    /// multi-device list) to the watch history. The current record is left
    /// untouched: watch sampling and multi-device capture are independent
    /// tracks.
    pub fn capture_sample(&mut self, multiple_devices: bool) {
        let values = if multiple_devices {
            Value::Array(
                self.multi_device_output
                    .iter()
                    .cloned()
                    .map(Value::Object)
                    .collect(),
            )
        } else {
            Value::Object(self.output.clone())
        };
        self.watch_output.push(WatchSample::now(values));
    }

    /// Clear the current record and the multi-device list so a polling
    /// caller can start the next tick clean. Watch history is kept.
    pub fn reset(&mut self) {
        self.output.clear();
        self.multi_device_output.clear();
    }

    /// Render the accumulated output and route it to the destination.
    ///
    /// `watch_tick` marks an intermediate poll: csv and human-readable
    /// formats emit nothing for ticks, json suppresses terminal output and
    /// appends to file destinations.
    pub fn print(&self, multi_device: bool, watch_tick: bool) -> Result<()> {
        match self.format {
            OutputFormat::Json => self.print_json(multi_device, watch_tick),
            OutputFormat::Csv => self.print_csv(multi_device, watch_tick),
            OutputFormat::HumanReadable => self.print_human(multi_device, watch_tick),
        }
    }

    fn print_json(&self, multi_device: bool, watch_tick: bool) -> Result<()> {
        let value = if multi_device {
            Value::Array(
                self.multi_device_output
                    .iter()
                    .cloned()
                    .map(Value::Object)
                    .collect(),
            )
        } else {
            Value::Object(self.output.clone())
        };

        match &self.destination {
            Destination::Stdout => {
                if watch_tick {
                    // Watch data reaches a terminal only through flush_watch.
                    return Ok(());
                }
                sink::print_stdout(&json::render(&value)?);
                Ok(())
            }
            Destination::File(path) => sink::append(path, &json::render(&value)?),
        }
    }

    fn print_csv(&self, multi_device: bool, watch_tick: bool) -> Result<()> {
        if watch_tick {
            // No tabular representation for a sampled timeline.
            return Ok(());
        }

        let records: Vec<ValueMap> = if multi_device {
            self.multi_device_output.clone()
        } else {
            vec![self.output.clone()]
        };

        let text = csv::render(&records)?;
        if text.is_empty() {
            return Ok(());
        }

        match &self.destination {
            Destination::Stdout => {
                // The gpuvsmi contract has no field-escaping convention.
                if self.compatibility == Compatibility::GpuvSmi {
                    sink::print_stdout(&text.replace('"', ""));
                } else {
                    sink::print_stdout(&text);
                }
                Ok(())
            }
            Destination::File(path) => sink::append(path, &text),
        }
    }

    fn print_human(&self, multi_device: bool, watch_tick: bool) -> Result<()> {
        if watch_tick {
            return Ok(());
        }

        let text = if multi_device {
            let mut combined = String::new();
            for record in &self.multi_device_output {
                combined.push_str(&humanize::render(
                    &Value::Object(record.clone()),
                    self.compatibility,
                ));
            }
            combined
        } else {
            humanize::render(&Value::Object(self.output.clone()), self.compatibility)
        };

        match &self.destination {
            Destination::Stdout => {
                sink::print_stdout(&text);
                Ok(())
            }
            Destination::File(path) => sink::append(path, &text),
        }
    }

    /// Final flush for a watch session: write the entire sample history as
    /// one `{timestamp, values}` array, overwriting a file destination from
    /// scratch. Only the json format has a history representation; other
    /// formats flush nothing. The history is discarded after a successful
    /// flush.
    pub fn flush_watch(&mut self) -> Result<()> {
        if self.format != OutputFormat::Json {
            return Ok(());
        }

        let text = json::render(&self.watch_output)?;
        match &self.destination {
            Destination::Stdout => sink::print_stdout(&text),
            Destination::File(path) => sink::overwrite(path, &text)?,
        }

        self.watch_output.clear();
        Ok(())
    }
}

fn gpuv_rewrite_map(map: &ValueMap) -> ValueMap {
    let mut out = ValueMap::new();
    for (key, child) in map {
        let key = match key.as_str() {
            "bdf" => "gpu_bdf".to_string(),
            "uuid" => "gpu_uuid".to_string(),
            _ => key.clone(),
        };
        out.insert(key, gpuv_rewrite(child));
    }
    out
}

fn gpuv_rewrite(value: &Value) -> Value {
    match value {
        Value::Object(map) => Value::Object(gpuv_rewrite_map(map)),
        Value::Array(items) => Value::Array(items.iter().map(gpuv_rewrite).collect()),
        Value::String(s) if s.contains("AMDSMI_STATUS") => Value::String("N/A".to_string()),
        other => other.clone(),
    }
}
