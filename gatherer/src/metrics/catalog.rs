use fc_metrics_config::MetricCatalog;

pub const HOST_METRICS: [&str; 15] = [
    "cpu_usage",
    "mem_usage",
    "nic_byte_in",
    "nic_byte_out",
    "disk_io_in",
    "disk_io_out",
    "logic_disk_usage",
    "vm_mem_usage",
    "vm_mem_total",
    "vm_mem_free",
    "vm_run_num",
    "hosts_vio_in",
    "hosts_vio_out",
    "hosts_vbyte_in",
    "hosts_vbyte_out",
];

pub const VM_METRICS: [&str; 9] = [
    "cpu_usage",
    "mem_usage",
    "mem_free",
    "disk_usage",
    "nic_byte_in",
    "nic_byte_out",
    "nic_byte_in_out",
    "disk_io_in",
    "disk_io_out",
];

/// Metric identifiers requested for one resource, in request order.
pub fn metric_ids(catalog: MetricCatalog) -> &'static [&'static str] {
    match catalog {
        MetricCatalog::Host => &HOST_METRICS,
        MetricCatalog::Vm => &VM_METRICS,
    }
}
