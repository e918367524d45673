//! # SOAP Envelope Codec
//!
//! Builds `callService` request envelopes and digs the JSON payload back out
//! of reply envelopes.
//!
//! The vendor speaks SOAP 1.1 in the loosest sense: a fixed envelope with a
//! single `callService` operation whose real payload is a JSON document
//! smuggled through the `paramsJson` element. Replies tuck their JSON inside
//! a `<response>` element, sometimes wrapped in CDATA and sometimes
//! entity-escaped, so extraction works on the raw reply text instead of a
//! full XML parse.

use regex::Regex;

use crate::infrastructure::soap::error::{GatewayError, GatewayResult};

/// Escapes the five XML special characters in `raw`.
#[must_use]
pub fn escape_xml(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Reverses [`escape_xml`], including the `&apos;` spelling some stacks emit.
///
/// `&amp;` is decoded last so that doubly-escaped text is not over-decoded.
#[must_use]
pub fn unescape_xml(escaped: &str) -> String {
    escaped
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&amp;", "&")
}

/// Renders a `callService` request envelope.
///
/// `params_json` is embedded entity-escaped, exactly as the vendor's own
/// client libraries do.
#[must_use]
pub fn build_envelope(service: &str, params_json: &str, app_token: &str, app_key: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8"?>
<SOAP-ENV:Envelope xmlns:SOAP-ENV="http://schemas.xmlsoap.org/soap/envelope/" xmlns:ns1="http://www.example.org/Ec/">
  <SOAP-ENV:Body>
    <ns1:callService>
      <paramsJson>{params}</paramsJson>
      <appToken>{token}</appToken>
      <appKey>{key}</appKey>
      <service>{service}</service>
    </ns1:callService>
  </SOAP-ENV:Body>
</SOAP-ENV:Envelope>"#,
        params = escape_xml(params_json),
        token = escape_xml(app_token),
        key = escape_xml(app_key),
        service = escape_xml(service),
    )
}

/// Pulls the JSON payload out of a reply envelope.
///
/// Holds the compiled `<response>` pattern so the regex is built once per
/// gateway instead of once per call.
#[derive(Debug, Clone)]
pub struct ResponseExtractor {
    pattern: Regex,
}

impl ResponseExtractor {
    /// Compiles the extractor.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Internal`] if the pattern fails to compile,
    /// which would mean a broken build rather than a bad reply.
    pub fn new() -> GatewayResult<Self> {
        let pattern = Regex::new(r"(?s)<response[^>]*>(.*?)</response>").map_err(|e| {
            GatewayError::internal(format!("response pattern failed to compile: {e}"))
        })?;
        Ok(Self { pattern })
    }

    /// Extracts the payload text from a reply body.
    ///
    /// CDATA-wrapped payloads are returned verbatim; anything else is
    /// entity-unescaped, which is a no-op for payloads the server embedded
    /// raw.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError::Protocol`] if the body has no `<response>`
    /// element.
    pub fn extract(&self, body: &str) -> GatewayResult<String> {
        let captures = self.pattern.captures(body).ok_or_else(|| {
            GatewayError::protocol("reply body has no <response> element")
        })?;
        let inner = captures.get(1).map_or("", |m| m.as_str()).trim();

        match inner
            .strip_prefix("<![CDATA[")
            .and_then(|rest| rest.strip_suffix("]]>"))
        {
            Some(cdata) => Ok(cdata.to_string()),
            None => Ok(unescape_xml(inner)),
        }
    }
}
