//! Dispatcher: resolves an operation by name, validates its arguments and
//! runs it.
//!
//! Validation happens entirely before the first remote call, so an invalid
//! invocation never touches the network. Every outcome, including unknown
//! operations and cancellation, is reported as an [`OperationResult`].

use crate::core::{
    application::{
        fanout::ClusterFanout,
        normalizer::{ResultShape, normalize, sum_field},
    },
    domain::{
        error::{ProxmoxError, ProxmoxResult, ValidationError},
        model::{
            EndpointDescriptor, OperationOutput, ParamKind, ParamSpec, Params, Payload, Record,
            RecordKind,
        },
        port::RequestExecutor,
    },
};
use crate::tools::application::{
    catalog::{Action, Catalog, CatalogEntry},
    response::OperationResult,
};
use serde_json::{Map, Value, json};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Named arguments of one invocation.
pub type Args = Map<String, Value>;

/// Placeholder filled per node during fan-out.
const NODE_PLACEHOLDER: &str = "node_name";

/// Validated arguments, keyed by argument name.
type Validated = BTreeMap<&'static str, Value>;

pub struct Dispatcher<E> {
    catalog: Arc<Catalog>,
    executor: E,
}

impl<E> Dispatcher<E>
where
    E: RequestExecutor,
{
    pub fn new(catalog: Arc<Catalog>, executor: E) -> Self {
        Self { catalog, executor }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Runs `operation` with `args`.
    pub async fn invoke(&self, operation: &str, args: &Args) -> OperationResult {
        debug!(operation, "Tool called");
        match self.run(operation, args).await {
            Ok(output) => OperationResult::success(output),
            Err(e) => {
                debug!(operation, error = %e, "Tool call failed");
                OperationResult::failure(operation, &e)
            }
        }
    }

    /// Like [`invoke`](Self::invoke), but abandons the call once `token` is
    /// cancelled. An in-flight request is dropped.
    pub async fn invoke_with_cancellation(
        &self,
        operation: &str,
        args: &Args,
        token: &CancellationToken,
    ) -> OperationResult {
        tokio::select! {
            biased;
            _ = token.cancelled() => {
                debug!(operation, "Tool call cancelled");
                OperationResult::failure(operation, &ProxmoxError::Cancelled)
            }
            result = self.invoke(operation, args) => result,
        }
    }

    async fn run(&self, operation: &str, args: &Args) -> ProxmoxResult<OperationOutput> {
        let entry = self
            .catalog
            .get(operation)
            .ok_or_else(|| ValidationError::UnknownOperation(operation.to_string()))?;
        let values = validate(&entry.params, args)?;
        for endpoint in entry.action.endpoints() {
            check_path_arguments(&values, endpoint, None)?;
        }

        match &entry.action {
            Action::Call { endpoint, shape } => {
                self.call(&entry.params, &values, *endpoint, *shape).await
            }
            Action::Compose { target } => self.compose(entry, target, values).await,
            Action::CollectAcrossNodes { endpoint, kind } => {
                self.collect_across_nodes(&entry.params, &values, *endpoint, *kind)
                    .await
            }
            Action::FirstAcrossNodes { endpoint, what } => {
                self.first_across_nodes(&entry.params, &values, *endpoint, what)
                    .await
            }
            Action::StorageQuota { info, content } => {
                self.storage_quota(&entry.params, &values, *info, *content)
                    .await
            }
            Action::VlanConfig { network } => {
                self.vlan_config(&entry.params, &values, *network).await
            }
        }
    }

    async fn call(
        &self,
        params: &[ParamSpec],
        values: &Validated,
        endpoint: EndpointDescriptor,
        shape: ResultShape,
    ) -> ProxmoxResult<OperationOutput> {
        let payload = self.execute(params, values, endpoint).await?;
        normalize(payload, shape)
    }

    async fn execute(
        &self,
        params: &[ParamSpec],
        values: &Validated,
        endpoint: EndpointDescriptor,
    ) -> ProxmoxResult<Payload> {
        let (path, request) = prepare(params, values, endpoint, None)?;
        self.executor
            .execute(endpoint.method, &path, &request)
            .await
    }

    /// Runs the target entry with arguments already validated by `entry`.
    ///
    /// The target's own contract is applied again so that its wire names and
    /// encodings take effect.
    async fn compose(
        &self,
        entry: &CatalogEntry,
        target: &str,
        values: Validated,
    ) -> ProxmoxResult<OperationOutput> {
        let target_entry = self.catalog.get(target).ok_or_else(|| {
            ProxmoxError::Contract(format!("{} delegates to unknown {}", entry.name, target))
        })?;
        let Action::Call { endpoint, shape } = &target_entry.action else {
            return Err(ProxmoxError::Contract(format!(
                "{} must delegate to a single call, {} is not one",
                entry.name, target
            )));
        };

        let forwarded: Args = values
            .into_iter()
            .map(|(name, value)| (name.to_string(), value))
            .collect();
        let target_values = validate(&target_entry.params, &forwarded)?;
        self.call(&target_entry.params, &target_values, *endpoint, *shape)
            .await
    }

    async fn collect_across_nodes(
        &self,
        params: &[ParamSpec],
        values: &Validated,
        endpoint: EndpointDescriptor,
        kind: RecordKind,
    ) -> ProxmoxResult<OperationOutput> {
        let executor = &self.executor;
        let fanout = ClusterFanout::new(executor);
        let records = fanout
            .collect(move |node| {
                let prepared = prepare(params, values, endpoint, Some(&node));
                async move {
                    let (path, request) = prepared?;
                    let payload = executor.execute(endpoint.method, &path, &request).await?;
                    let records = normalize(payload, ResultShape::List(kind))?.into_items();
                    Ok::<_, ProxmoxError>(
                        records
                            .into_iter()
                            .map(|record| tag_node(record, &node))
                            .collect::<Vec<_>>(),
                    )
                }
            })
            .await?;
        Ok(OperationOutput::list(records))
    }

    async fn first_across_nodes(
        &self,
        params: &[ParamSpec],
        values: &Validated,
        endpoint: EndpointDescriptor,
        what: &str,
    ) -> ProxmoxResult<OperationOutput> {
        let executor = &self.executor;
        let fanout = ClusterFanout::new(executor);
        fanout
            .first_success(what, move |node| {
                let prepared = prepare(params, values, endpoint, Some(&node));
                async move {
                    let (path, request) = prepared?;
                    let payload = executor.execute(endpoint.method, &path, &request).await?;
                    normalize(payload, ResultShape::Raw)
                }
            })
            .await
    }

    async fn storage_quota(
        &self,
        params: &[ParamSpec],
        values: &Validated,
        info: EndpointDescriptor,
        content: EndpointDescriptor,
    ) -> ProxmoxResult<OperationOutput> {
        let info = match self.execute(params, values, info).await? {
            Payload::Object(map) => Value::Object(map),
            other => {
                return Err(ProxmoxError::Protocol(format!(
                    "unexpected shape: expected object, got {}",
                    other.shape()
                )));
            }
        };

        let content: Vec<Value> = match self.execute(params, values, content).await? {
            Payload::Null => Vec::new(),
            Payload::Array(items) => items.into_iter().filter(Value::is_object).collect(),
            other => {
                return Err(ProxmoxError::Protocol(format!(
                    "unexpected shape: expected array, got {}",
                    other.shape()
                )));
            }
        };

        let used_bytes = sum_field(&content, "size");
        Ok(OperationOutput::Raw(json!({
            "storage": values.get("storage"),
            "info": info,
            "used_bytes": used_bytes,
            "content": content,
        })))
    }

    async fn vlan_config(
        &self,
        params: &[ParamSpec],
        values: &Validated,
        network: EndpointDescriptor,
    ) -> ProxmoxResult<OperationOutput> {
        let payload = self.execute(params, values, network).await?;
        let interfaces =
            normalize(payload, ResultShape::Keyed(RecordKind::NetworkInterface))?.into_items();

        let mut vlans: Vec<_> = interfaces
            .into_iter()
            .filter_map(|record| match record {
                Record::NetworkInterface(iface) => iface.vlan_config(),
                _ => None,
            })
            .collect();
        vlans.sort_by(|a, b| a.interface.cmp(&b.interface));

        Ok(OperationOutput::list(
            vlans.into_iter().map(Record::Vlan).collect(),
        ))
    }
}

/// Validates every declared argument, stopping at the first violation.
fn validate(params: &[ParamSpec], args: &Args) -> Result<Validated, ValidationError> {
    let mut values = Validated::new();
    for spec in params {
        if let Some(value) = spec.coerce(args.get(spec.name))? {
            values.insert(spec.name, value);
        }
    }
    Ok(values)
}

/// Renders the request path and builds the request parameters.
///
/// Free-form object arguments are merged first; declared arguments override
/// colliding keys. Arguments used in the path are not sent again unless
/// marked as echoed. `node` fills `{node_name}` during fan-out.
fn prepare(
    params: &[ParamSpec],
    values: &Validated,
    endpoint: EndpointDescriptor,
    node: Option<&str>,
) -> ProxmoxResult<(String, Params)> {
    check_path_arguments(values, endpoint, node)?;
    let path = endpoint.path.render(|name| match node {
        Some(node) if name == NODE_PLACEHOLDER => Some(encode_segment(node)),
        _ => values.get(name).and_then(path_segment),
    })?;
    let placeholders = endpoint.path.placeholders()?;

    let mut request = Params::new();
    for spec in params.iter().filter(|spec| spec.kind == ParamKind::Object) {
        if let Some(Value::Object(map)) = values.get(spec.name) {
            request.extend(map.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
    }
    for spec in params.iter().filter(|spec| spec.kind != ParamKind::Object) {
        if placeholders.contains(&spec.name) && !spec.echo {
            continue;
        }
        if let Some(value) = values.get(spec.name) {
            request.insert(spec.wire_key().to_string(), spec.encode(value));
        }
    }
    Ok((path, request))
}

/// Refuses `.` and `..` as placeholder values.
///
/// URL parsing collapses dot segments even when percent-encoded, which would
/// turn the request into one against a different endpoint.
fn check_path_arguments(
    values: &Validated,
    endpoint: EndpointDescriptor,
    node: Option<&str>,
) -> ProxmoxResult<()> {
    for name in endpoint.path.placeholders()? {
        let value = match node {
            Some(node) if name == NODE_PLACEHOLDER => Some(node),
            _ => values.get(name).and_then(Value::as_str),
        };
        if let Some(value @ ("." | "..")) = value {
            return Err(ValidationError::Field {
                field: name.to_string(),
                message: format!("'{}' is not a valid path segment", value),
            }
            .into());
        }
    }
    Ok(())
}

fn path_segment(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(encode_segment(s)),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Escapes characters that would change the meaning of a path segment.
fn encode_segment(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '/' => out.push_str("%2F"),
            '?' => out.push_str("%3F"),
            '#' => out.push_str("%23"),
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            c => out.push(c),
        }
    }
    out
}

fn tag_node(record: Record, node: &str) -> Record {
    match record {
        Record::Backup(mut backup) => {
            backup.node.get_or_insert_with(|| node.to_string());
            Record::Backup(backup)
        }
        other => other,
    }
}
