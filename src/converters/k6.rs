//! k6 script converter for OpenAPI documents
//!
//! This module generates a k6 JavaScript load test exercising every
//! extracted endpoint in document order.

use crate::error::Result;
use crate::extractor::{extract_endpoints, resolve_base_url};
use crate::models::{Endpoint, HttpMethod};

use super::body::synthesize_request_body;
use super::tracking::{generate_value_tracker, resolve_path};
use super::{ConvertOptions, Converter, GeneratedScript, LoadProfile, Registry, js};
use serde_json::Value;

/// Converter for generating k6 test scripts
#[derive(Debug, Clone, Default)]
pub struct K6Converter {
    registry: Registry,
}

impl K6Converter {
    /// Create a new K6Converter
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate the `options` export
    fn generate_options(profile: &LoadProfile) -> Vec<String> {
        let mut lines = vec!["export const options = {".to_string(), "    stages: [".to_string()];
        for stage in &profile.stages {
            let entry = format!(
                "{{ duration: {}, target: {} }},",
                js::string_literal(&stage.duration),
                stage.target
            );
            lines.push(format!("        {:<34}// {}", entry, stage.label));
        }
        lines.push("    ],".to_string());
        lines.push("    thresholds: {".to_string());
        for (metric, rules) in &profile.thresholds {
            let rules: Vec<String> = rules.iter().map(|r| js::string_literal(r)).collect();
            lines.push(format!(
                "        {}: [{}],",
                js::string_literal(metric),
                rules.join(", ")
            ));
        }
        lines.push("    },".to_string());
        lines.push("};".to_string());
        lines
    }

    /// Imports, metrics, registry, options and the opening of the default function
    fn generate_preamble(&self, base_url: &str, options: &ConvertOptions) -> Vec<String> {
        let mut lines = vec![
            "import http from 'k6/http';".to_string(),
            "import { check, sleep } from 'k6';".to_string(),
            "import { Rate } from 'k6/metrics';".to_string(),
            String::new(),
            "// Error rate metric".to_string(),
            "const errorRate = new Rate('errors');".to_string(),
            String::new(),
        ];
        lines.extend(self.registry.declaration());
        lines.push(String::new());
        lines.extend(Self::generate_options(&options.load_profile));
        lines.push(String::new());

        let auth_fallback = options
            .auth_key
            .as_deref()
            .filter(|key| !key.is_empty())
            .map(js::string_literal)
            .unwrap_or_else(|| "null".to_string());

        lines.push("export default function () {".to_string());
        lines.push(format!(
            "    const baseUrl = __ENV.BASE_URL || {};",
            js::string_literal(base_url)
        ));
        lines.push(format!("    const authKey = __ENV.AUTH_KEY || {};", auth_fallback));
        lines
    }

    fn generate_headers(endpoint: &Endpoint, index: usize) -> Vec<String> {
        let mut lines = vec![
            format!("    const headers{} = {{", index),
            "        'Content-Type': 'application/json',".to_string(),
        ];
        if endpoint.requires_auth() {
            lines.push(
                "        ...(authKey ? { 'Authorization': `Bearer ${authKey}` } : {}),".to_string(),
            );
        }
        lines.push("    };".to_string());
        lines
    }

    fn generate_request(method: HttpMethod, index: usize, body_var: Option<&str>) -> String {
        let url = format!("url{}", index);
        let params = format!("{{ headers: headers{} }}", index);
        let args = match method {
            HttpMethod::Get | HttpMethod::Head => format!("{}, {}", url, params),
            _ => {
                let body = body_var
                    .map(|var| format!("JSON.stringify({})", var))
                    .unwrap_or_else(|| "null".to_string());
                format!("{}, {}, {}", url, body, params)
            }
        };
        format!(
            "    const res{} = http.{}({});",
            index,
            method.k6_function(),
            args
        )
    }

    /// Generate k6 code for one endpoint
    fn generate_endpoint(&self, endpoint: &Endpoint, index: usize) -> Vec<String> {
        let mut lines = vec![
            String::new(),
            format!(
                "    // {}: {} {}",
                endpoint.operation_id, endpoint.method, endpoint.path
            ),
            format!(
                "    const url{} = baseUrl + `{}`;",
                index,
                resolve_path(&endpoint.path, &self.registry)
            ),
        ];
        lines.extend(Self::generate_headers(endpoint, index));

        let body_var = format!("body{}", index);
        let body = if endpoint.method.has_body() {
            synthesize_request_body(&endpoint.operation)
        } else {
            None
        };
        if let Some(ref body) = body {
            lines.push(body.render(&body_var, &self.registry));
        }

        lines.push(String::new());
        lines.push(Self::generate_request(
            endpoint.method,
            index,
            body.as_ref().map(|_| body_var.as_str()),
        ));

        lines.push(String::new());
        lines.push(format!("    const success{} = check(res{}, {{", index, index));
        lines.push(
            "        'status is 2xx or 3xx': (r) => r.status >= 200 && r.status < 400,".to_string(),
        );
        lines.push("    });".to_string());
        lines.push(format!("    errorRate.add(!success{});", index));

        let tracker = generate_value_tracker(endpoint, &format!("res{}", index), &self.registry);
        if !tracker.is_empty() {
            lines.push(tracker);
        }

        lines
    }

    /// Assemble a script for already extracted endpoints
    pub fn convert_endpoints(
        &self,
        endpoints: &[Endpoint],
        base_url: &str,
        options: &ConvertOptions,
    ) -> String {
        let mut lines = self.generate_preamble(base_url, options);

        for (index, endpoint) in endpoints.iter().enumerate() {
            lines.extend(self.generate_endpoint(endpoint, index));
        }

        lines.push(String::new());
        lines.push("    // Small sleep between requests".to_string());
        lines.push("    sleep(0.5);".to_string());
        lines.push("}".to_string());

        let mut script = lines.join("\n");
        script.push('\n');
        script
    }
}

impl Converter for K6Converter {
    type Output = GeneratedScript;

    fn convert_spec(&self, spec: &Value, options: &ConvertOptions) -> Result<Self::Output> {
        let endpoints = extract_endpoints(spec);
        // Every endpoint carries the document's server URL
        let base_url = endpoints
            .first()
            .map(|endpoint| endpoint.base_url.clone())
            .unwrap_or_else(|| resolve_base_url(spec));

        tracing::info!(
            "Generating k6 script for {} endpoints against {}",
            endpoints.len(),
            base_url
        );

        Ok(GeneratedScript {
            content: self.convert_endpoints(&endpoints, &base_url, options),
            endpoint_count: endpoints.len(),
        })
    }
}
