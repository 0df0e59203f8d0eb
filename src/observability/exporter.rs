//! Span exporter writing OTLP/JSON lines to a rotating file.

use super::otlp;
use super::rotating::RotatingFile;
use futures_util::future::BoxFuture;
use opentelemetry::trace::TraceError;
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;

#[derive(Debug)]
struct FileSpanExporter {
    file: RotatingFile,
    resource: Resource,
    is_shutdown: bool,
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        let result = if self.is_shutdown {
            Err(TraceError::from("trace exporter is shut down"))
        } else {
            let line = otlp::encode_batch(&self.resource, &batch).to_string();
            self.file
                .write_line(&line)
                .map_err(|e| TraceError::from(e.to_string()))
        };

        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown = true;
    }

    fn set_resource(&mut self, resource: &Resource) {
        self.resource = resource.clone();
    }
}

/// Builds a tracer provider that exports every finished span synchronously
/// to `file_path`. Plugins have no background threads, so no batching.
pub fn file_tracer_provider(file_path: PathBuf, resource: Resource) -> TracerProvider {
    let exporter = FileSpanExporter {
        file: RotatingFile::new(file_path),
        resource: resource.clone(),
        is_shutdown: false,
    };

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::FutureExt;
    use opentelemetry::KeyValue;
    use tempfile::TempDir;

    #[test]
    fn shut_down_exporter_rejects_batches() {
        let dir = TempDir::new().unwrap();
        let mut exporter = FileSpanExporter {
            file: RotatingFile::new(dir.path().join("trace.json")),
            resource: Resource::new(vec![KeyValue::new("service.name", "cinefind")]),
            is_shutdown: false,
        };

        assert!(exporter.export(vec![]).now_or_never().unwrap().is_ok());
        exporter.shutdown();
        assert!(exporter.export(vec![]).now_or_never().unwrap().is_err());

        let written = std::fs::read_to_string(dir.path().join("trace.json")).unwrap();
        assert_eq!(written.lines().count(), 1);
    }
}
