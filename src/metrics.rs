//! Per-path request counters with Prometheus text exposition.
//!
//! The counters record but never influence behavior; rendering follows
//! the metric names the existing dashboards already scrape
//! (`<service>_service_info`, `by_path_counter`).

use dashmap::DashMap;

pub struct RequestMetrics {
    service: &'static str,
    by_path: DashMap<String, u64>,
}

impl RequestMetrics {
    pub fn new(service: &'static str) -> Self {
        Self {
            service,
            by_path: DashMap::new(),
        }
    }

    /// Count one request on the given path.
    pub fn hit(&self, path: &str) {
        *self.by_path.entry(path.to_string()).or_insert(0) += 1;
    }

    /// Render the Prometheus text format.
    pub fn render(&self) -> String {
        let prefix = self.service.replace('-', "_");

        let mut out = String::new();
        out.push_str(&format!(
            "# HELP {prefix}_info Service info\n# TYPE {prefix}_info gauge\n{prefix}_info{{version=\"1.0.0\"}} 1\n"
        ));
        out.push_str(
            "# HELP by_path_counter Request count by request paths\n# TYPE by_path_counter counter\n",
        );

        // Sorted for a stable exposition
        let mut paths: Vec<(String, u64)> = self
            .by_path
            .iter()
            .map(|entry| (entry.key().clone(), *entry.value()))
            .collect();
        paths.sort();
        for (path, count) in paths {
            out.push_str(&format!("by_path_counter{{path=\"{path}\"}} {count}\n"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_counts_by_path() {
        let metrics = RequestMetrics::new("order-service");
        metrics.hit("/orders");
        metrics.hit("/orders");
        metrics.hit("/health");

        let text = metrics.render();
        assert!(text.contains("order_service_info{version=\"1.0.0\"} 1"));
        assert!(text.contains("by_path_counter{path=\"/orders\"} 2"));
        assert!(text.contains("by_path_counter{path=\"/health\"} 1"));
    }

    #[test]
    fn test_render_empty() {
        let metrics = RequestMetrics::new("user-service");
        let text = metrics.render();
        assert!(text.contains("user_service_info"));
        assert!(!text.contains("by_path_counter{"));
    }
}
