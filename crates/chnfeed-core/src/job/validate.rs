//! Turn a raw field set into a [`JobSpec`] or a typed rejection.

use thiserror::Error;
use url::Url;

use super::extract::RawFieldSet;
use super::profile::{Direction, JobProfile};
use super::{Endpoint, Filters, JobMode, JobSpec, Token};

/// Filter names the feed service accepts. Anything else is dropped.
pub const FILTER_WHITELIST: &[&str] = &[
    "indicator",
    "itype",
    "confidence",
    "provider",
    "limit",
    "application",
    "nolog",
    "tags",
    "days",
    "hours",
    "groups",
    "reporttime",
    "cc",
    "asn",
    "asn_desc",
    "rdata",
    "firsttime",
    "lasttime",
    "region",
    "id",
];

/// Group name safelist entries may never be submitted to.
const FORBIDDEN_PROVIDER: &str = "everyone";

/// Why a job definition was not turned into a [`JobSpec`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("forbidden provider `{0}`: safelist entries may not be submitted to the everyone group")]
    ForbiddenProvider(String),
    #[error("missing required filter: tags")]
    MissingTagsFilter,
    #[error("invalid remote `{remote}`: {reason}")]
    InvalidRemote { remote: String, reason: String },
}

/// Validates raw field sets against one [`JobProfile`].
#[derive(Debug, Clone, Copy)]
pub struct JobValidator<'a> {
    profile: &'a JobProfile,
}

impl<'a> JobValidator<'a> {
    pub fn new(profile: &'a JobProfile) -> Self {
        Self { profile }
    }

    pub fn validate(&self, mut fields: RawFieldSet) -> Result<JobSpec, ConfigError> {
        let remote = require(&mut fields, "REMOTE")?;
        let token = require(&mut fields, "TOKEN")?;
        let filename = require(&mut fields, "FILENAME")?;

        let upload = match self.profile.direction {
            Direction::Upload => {
                let provider = require(&mut fields, "PROVIDER")?;
                let itype = require(&mut fields, "ITYPE")?;
                if provider.eq_ignore_ascii_case(FORBIDDEN_PROVIDER) {
                    return Err(ConfigError::ForbiddenProvider(provider));
                }
                Some((provider, itype))
            }
            Direction::Download => None,
        };

        let verify_tls = fields
            .take("TLS_VERIFY")
            .map(|v| v.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        let remote = Url::parse(&remote).map_err(|e| ConfigError::InvalidRemote {
            remote: remote.clone(),
            reason: e.to_string(),
        })?;

        let mode = match upload {
            Some((group, indicator_type)) => JobMode::Upload {
                input_path: take_non_empty(&mut fields, "INPUT_PATH")
                    .unwrap_or_else(|| self.profile.default_dir.to_string())
                    .into(),
                group,
                indicator_type,
            },
            None => JobMode::Download {
                output_path: take_non_empty(&mut fields, "OUTPUT_PATH")
                    .unwrap_or_else(|| self.profile.default_dir.to_string())
                    .into(),
            },
        };

        let filters = self.extract_filters(fields)?;

        Ok(JobSpec {
            endpoint: Endpoint {
                remote,
                token: Token::new(token),
                verify_tls,
            },
            destination_name: filename,
            filters,
            mode,
        })
    }

    fn extract_filters(&self, fields: RawFieldSet) -> Result<Filters, ConfigError> {
        let label = fields.label();
        let mut filters = Filters::new();
        for (name, value) in fields.into_remaining() {
            let lower = name.to_ascii_lowercase();
            if FILTER_WHITELIST.contains(&lower.as_str()) {
                filters.insert(lower, crate::keystore::strip_quotes(&value).to_string());
            } else {
                tracing::debug!(index = %label, field = %name, "ignoring unrecognized field");
            }
        }
        for (name, value) in self.profile.default_filters {
            let entry = filters.entry((*name).to_string()).or_default();
            if entry.is_empty() {
                *entry = (*value).to_string();
            }
        }
        if self.profile.require_tags && filters.get("tags").map_or(true, |t| t.is_empty()) {
            return Err(ConfigError::MissingTagsFilter);
        }
        Ok(filters)
    }
}

/// Optional field; an empty value counts as unset.
fn take_non_empty(fields: &mut RawFieldSet, name: &str) -> Option<String> {
    fields.take(name).filter(|v| !v.is_empty())
}

fn require(fields: &mut RawFieldSet, name: &'static str) -> Result<String, ConfigError> {
    fields.take(name).ok_or(ConfigError::MissingField(name))
}
