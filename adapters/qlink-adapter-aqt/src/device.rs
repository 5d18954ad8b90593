//! AQT device implementation.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, instrument};

use qlink_hal::{
    Capabilities, Device, DeviceConfig, DeviceError, DeviceFactory, DeviceResult, Job, Operation,
    OperationSet, Samples,
};

use crate::api::{AqtClient, HttpTransport, JobSubmission, Transport, join_path};
use crate::circuit::{AqtCircuit, OPERATION_MAP};
use crate::config::{AqtConfig, PollPolicy, TOKEN_ENV, resolve_api_key};
use crate::error::{AqtError, AqtResult};

/// Shot count used when none is given.
pub const DEFAULT_SHOTS: u32 = 200;

/// Observables the device can measure (after diagonalizing rotations).
pub const OBSERVABLES: [&str; 6] = [
    "PauliX",
    "PauliY",
    "PauliZ",
    "Identity",
    "Hadamard",
    "Hermitian",
];

/// Source of the fallback API key.
type TokenSource = fn() -> Option<String>;

fn env_token() -> Option<String> {
    std::env::var(TOKEN_ENV).ok()
}

/// Gateway target a device submits to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    /// The base gateway endpoint.
    Device,
    /// Noiseless cloud simulator.
    Simulator,
    /// Cloud simulator with AQT's noise model.
    NoisySimulator,
}

impl Target {
    /// All targets, in registration order.
    pub const ALL: [Target; 3] = [Target::Device, Target::Simulator, Target::NoisySimulator];

    /// Human-readable device name.
    pub fn name(self) -> &'static str {
        match self {
            Target::Device => "AQT Device",
            Target::Simulator => "AQT Simulator",
            Target::NoisySimulator => "AQT Noisy Simulator",
        }
    }

    /// Short name the framework loads the device by.
    pub fn short_name(self) -> &'static str {
        match self {
            Target::Device => "aqt.base_device",
            Target::Simulator => "aqt.sim",
            Target::NoisySimulator => "aqt.noisy_sim",
        }
    }

    /// Path appended to the gateway base URL.
    pub fn path(self) -> &'static str {
        match self {
            Target::Device => "",
            Target::Simulator => "sim/",
            Target::NoisySimulator => "sim/noise-model-1",
        }
    }

    /// Whether the target is a simulator.
    pub fn is_simulator(self) -> bool {
        !matches!(self, Target::Device)
    }

    /// Look up a target by short name.
    pub fn from_short_name(short_name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.short_name() == short_name)
    }
}

/// AQT ion-trap device.
///
/// Translates framework operations into AQT circuits, submits them to the
/// gateway, and polls until samples are available.
///
/// # Authentication
///
/// Pass an API key explicitly or set `AQT_TOKEN`. A missing key fails at
/// construction and at every `reset()`.
///
/// # Example
///
/// ```ignore
/// use qlink_adapter_aqt::AqtDevice;
/// use qlink_hal::{Device, Operation};
///
/// let mut device = AqtDevice::simulator(3, 100, None)?;
/// let samples = device
///     .execute(&[Operation::basis_state(&[1, 0, 1], vec![0, 1, 2])], &[])
///     .await?;
/// ```
pub struct AqtDevice {
    target: Target,
    capabilities: Capabilities,
    config: AqtConfig,
    transport: Arc<dyn Transport>,
    token_source: TokenSource,
    client: AqtClient,
    initial_shots: u32,
    shots: u32,
    circuit: AqtCircuit,
    circuit_json: String,
    samples: Option<Vec<u64>>,
    last_job: Option<Job>,
}

impl std::fmt::Debug for AqtDevice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AqtDevice")
            .field("target", &self.target)
            .field("num_wires", &self.capabilities.num_wires)
            .field("shots", &self.shots)
            .field("client", &self.client)
            .field("circuit_len", &self.circuit.len())
            .finish_non_exhaustive()
    }
}

impl AqtDevice {
    /// Create a device on the base gateway endpoint.
    pub fn new(wires: usize, shots: u32, api_key: Option<String>) -> AqtResult<Self> {
        Self::with_target(Target::Device, wires, shots, api_key)
    }

    /// Create a device on the noiseless simulator.
    pub fn simulator(wires: usize, shots: u32, api_key: Option<String>) -> AqtResult<Self> {
        Self::with_target(Target::Simulator, wires, shots, api_key)
    }

    /// Create a device on the noisy simulator.
    pub fn noisy_simulator(wires: usize, shots: u32, api_key: Option<String>) -> AqtResult<Self> {
        Self::with_target(Target::NoisySimulator, wires, shots, api_key)
    }

    /// Create a device for `target`, reading `AQT_BASE_URL` for the gateway host.
    pub fn with_target(
        target: Target,
        wires: usize,
        shots: u32,
        api_key: Option<String>,
    ) -> AqtResult<Self> {
        let mut config = AqtConfig::from_env();
        config.api_key = api_key;
        Self::with_config(target, wires, shots, config)
    }

    /// Create a device from an explicit configuration.
    pub fn with_config(
        target: Target,
        wires: usize,
        shots: u32,
        config: AqtConfig,
    ) -> AqtResult<Self> {
        let transport = HttpTransport::new(config.request_timeout, config.connect_timeout)?;
        Self::with_transport(target, wires, shots, config, Arc::new(transport))
    }

    /// Create a device that talks through a custom transport.
    pub fn with_transport(
        target: Target,
        wires: usize,
        shots: u32,
        config: AqtConfig,
        transport: Arc<dyn Transport>,
    ) -> AqtResult<Self> {
        Self::with_token_source(target, wires, shots, config, transport, env_token)
    }

    fn with_token_source(
        target: Target,
        wires: usize,
        shots: u32,
        mut config: AqtConfig,
        transport: Arc<dyn Transport>,
        token_source: TokenSource,
    ) -> AqtResult<Self> {
        let client = load_client(&mut config, target, &transport, token_source)?;
        let capabilities = Capabilities::qubit(target.name(), target.short_name(), wires)
            .with_simulator(target.is_simulator());

        Ok(Self {
            target,
            capabilities,
            config,
            transport,
            token_source,
            client,
            initial_shots: shots,
            shots,
            circuit: AqtCircuit::new(),
            circuit_json: String::new(),
            samples: None,
            last_job: None,
        })
    }

    /// Gateway target.
    pub fn target(&self) -> Target {
        self.target
    }

    /// Endpoint URL jobs are sent to.
    pub fn hostname(&self) -> &str {
        self.client.url()
    }

    /// Change the shot count for the next execution. `reset()` restores the
    /// value the device was created with.
    pub fn set_shots(&mut self, shots: u32) {
        self.shots = shots;
    }

    /// Circuit accumulated by the current execution.
    pub fn circuit(&self) -> &AqtCircuit {
        &self.circuit
    }

    /// JSON sent as `data` by the last submission.
    pub fn circuit_json(&self) -> &str {
        &self.circuit_json
    }

    /// Raw integer samples of the last execution.
    pub fn raw_samples(&self) -> Option<&[u64]> {
        self.samples.as_deref()
    }

    /// Job record of the last submission.
    pub fn last_job(&self) -> Option<&Job> {
        self.last_job.as_ref()
    }

    /// Reload the API key and endpoint.
    fn set_api_configs(&mut self) -> AqtResult<()> {
        self.client = load_client(
            &mut self.config,
            self.target,
            &self.transport,
            self.token_source,
        )?;
        Ok(())
    }

    #[instrument(skip_all, fields(device = %self.target.short_name()))]
    async fn run(&mut self, operations: &[Operation], rotations: &[Operation]) -> AqtResult<()> {
        if let Some(op) = operations.iter().skip(1).find(|op| op.is_state_preparation()) {
            return Err(AqtError::OperationOrdering(op.name.clone()));
        }

        let mut circuit = AqtCircuit::new();
        for operation in operations {
            circuit.push_operation(operation)?;
        }
        // diagonalize observables
        for operation in rotations {
            circuit.push_operation(operation)?;
        }
        let circuit_json = circuit.to_json()?;

        self.circuit = circuit;
        self.circuit_json = circuit_json;
        debug!("AQT circuit: {}", self.circuit_json);

        let submission = JobSubmission {
            access_token: self.client.access_token(),
            no_qubits: self.capabilities.num_wires,
            repetitions: self.shots,
            data: &self.circuit_json,
        };
        let response = self.client.submit(&submission).await?;

        let mut job = Job::new(response.id.clone(), self.shots);
        let outcome = self.client.wait(response, &mut job).await;
        self.last_job = Some(job);
        self.samples = Some(outcome?);
        Ok(())
    }
}

/// Resolve the API key (sticky once found) and build a client for `target`.
fn load_client(
    config: &mut AqtConfig,
    target: Target,
    transport: &Arc<dyn Transport>,
    token_source: TokenSource,
) -> AqtResult<AqtClient> {
    let api_key = resolve_api_key(config.api_key.take(), token_source())?;
    config.api_key = Some(api_key.clone());
    let url = join_path(&config.base_url, target.path());
    Ok(AqtClient::new(transport.clone(), url, api_key, config.poll))
}

#[async_trait]
impl Device for AqtDevice {
    fn name(&self) -> &str {
        &self.capabilities.name
    }

    fn capabilities(&self) -> &Capabilities {
        &self.capabilities
    }

    fn operations(&self) -> OperationSet {
        OPERATION_MAP.keys().copied().collect()
    }

    fn observables(&self) -> OperationSet {
        OBSERVABLES.into_iter().collect()
    }

    fn shots(&self) -> u32 {
        self.shots
    }

    async fn apply(
        &mut self,
        operations: &[Operation],
        rotations: &[Operation],
    ) -> DeviceResult<()> {
        info!(
            "Applying {} operations and {} rotations on {} wires, {} shots",
            operations.len(),
            rotations.len(),
            self.capabilities.num_wires,
            self.shots
        );
        self.run(operations, rotations).await.map_err(Into::into)
    }

    fn reset(&mut self) -> DeviceResult<()> {
        self.shots = self.initial_shots;
        self.circuit.clear();
        self.circuit_json.clear();
        self.samples = None;
        self.last_job = None;
        self.set_api_configs()?;
        Ok(())
    }

    fn generate_samples(&self) -> DeviceResult<Samples> {
        let raw = self.samples.as_deref().ok_or(DeviceError::NoSamples)?;
        Samples::from_raw(raw, self.capabilities.num_wires)
    }
}

impl DeviceFactory for AqtDevice {
    /// Build a device from `config.name` (a target short name).
    ///
    /// Recognized `extra` keys: `wires` (required), `shots`,
    /// `poll_interval_ms`, `poll_timeout_ms`, `max_polls`.
    fn from_config(config: DeviceConfig) -> DeviceResult<Self> {
        let target = Target::from_short_name(&config.name)
            .ok_or_else(|| DeviceError::UnknownDevice(config.name.clone()))?;

        let wires = config
            .extra_u64("wires")
            .and_then(|w| usize::try_from(w).ok())
            .ok_or_else(|| DeviceError::Configuration("missing 'wires'".into()))?;
        let shots = match config.extra_u64("shots") {
            Some(s) => u32::try_from(s)
                .map_err(|_| DeviceError::Configuration(format!("shot count {s} too large")))?,
            None => DEFAULT_SHOTS,
        };

        let mut poll = PollPolicy::default();
        if let Some(ms) = config.extra_u64("poll_interval_ms") {
            poll = poll.with_interval(std::time::Duration::from_millis(ms));
        }
        if let Some(ms) = config.extra_u64("poll_timeout_ms") {
            poll = poll.with_timeout(std::time::Duration::from_millis(ms));
        }
        if let Some(max) = config.extra_u64("max_polls") {
            poll = poll.with_max_polls(u32::try_from(max).unwrap_or(u32::MAX));
        }

        let mut aqt_config = AqtConfig::from_env().with_poll_policy(poll);
        aqt_config.api_key = config.token;
        if let Some(endpoint) = config.endpoint {
            aqt_config.base_url = endpoint;
        }

        Ok(Self::with_config(target, wires, shots, aqt_config)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::ScriptedTransport;
    use serde_json::json;
    use std::f64::consts::PI;
    use std::time::Duration;

    fn bits(samples: &Samples) -> Vec<Vec<u8>> {
        samples.bits().rows().into_iter().map(|r| r.to_vec()).collect()
    }

    fn config() -> AqtConfig {
        AqtConfig::default()
            .with_api_key("test-key")
            .with_base_url("https://gateway.test/marmot")
            .with_poll_policy(PollPolicy::unbounded(Duration::ZERO).with_max_polls(5))
    }

    fn device(
        target: Target,
        wires: usize,
        shots: u32,
    ) -> (AqtDevice, Arc<ScriptedTransport>) {
        let transport = Arc::new(ScriptedTransport::new());
        let device =
            AqtDevice::with_transport(target, wires, shots, config(), transport.clone()).unwrap();
        (device, transport)
    }

    #[test]
    fn test_target_paths_and_names() {
        let (dev, _) = device(Target::Device, 2, 10);
        assert_eq!(dev.hostname(), "https://gateway.test/marmot");
        let (sim, _) = device(Target::Simulator, 2, 10);
        assert_eq!(sim.hostname(), "https://gateway.test/marmot/sim/");
        let (noisy, _) = device(Target::NoisySimulator, 2, 10);
        assert_eq!(
            noisy.hostname(),
            "https://gateway.test/marmot/sim/noise-model-1"
        );
        assert_eq!(
            Target::from_short_name("aqt.noisy_sim"),
            Some(Target::NoisySimulator)
        );
        assert_eq!(Target::from_short_name("aqt.unknown"), None);
    }

    fn no_env_token() -> Option<String> {
        None
    }

    fn keyless_config() -> AqtConfig {
        let mut config = config();
        config.api_key = None;
        config
    }

    #[test]
    fn test_missing_api_key_fails_at_construction() {
        let transport: Arc<dyn Transport> = Arc::new(ScriptedTransport::new());
        let err = AqtDevice::with_token_source(
            Target::Simulator,
            2,
            10,
            keyless_config(),
            transport,
            no_env_token,
        )
        .unwrap_err();
        assert!(matches!(err, AqtError::MissingToken));
    }

    #[test]
    fn test_env_key_is_used_and_kept() {
        let transport: Arc<dyn Transport> = Arc::new(ScriptedTransport::new());
        let mut dev = AqtDevice::with_token_source(
            Target::Simulator,
            2,
            10,
            keyless_config(),
            transport,
            || Some("env-key".to_string()),
        )
        .unwrap();
        assert_eq!(dev.client.access_token(), "env-key");

        dev.token_source = no_env_token;
        dev.reset().unwrap();
        assert_eq!(dev.client.access_token(), "env-key");
    }

    #[test]
    fn test_reset_without_api_key_is_configuration_error() {
        let (mut dev, _) = device(Target::Simulator, 2, 10);
        dev.token_source = no_env_token;
        dev.config.api_key = None;

        let err = dev.reset().unwrap_err();

        assert!(matches!(err, DeviceError::Configuration(msg) if msg.contains("AQT_TOKEN")));
    }

    #[test]
    fn test_operations_and_observables() {
        let (dev, _) = device(Target::Simulator, 2, 10);
        let ops = dev.operations();
        for name in [
            "RX",
            "RY",
            "RZ",
            "BasisState",
            "PauliX",
            "PauliY",
            "PauliZ",
            "Hadamard",
            "R",
            "MS",
        ] {
            assert!(ops.contains(name), "{name}");
        }
        assert_eq!(ops.len(), 10);
        assert!(dev.supports_observable("Hermitian"));
        assert!(!dev.supports_observable("Projector"));
    }

    #[test]
    fn test_capabilities() {
        let (dev, _) = device(Target::Simulator, 3, 10);
        let caps = dev.capabilities();
        assert_eq!(caps.short_name, "aqt.sim");
        assert_eq!(caps.num_wires, 3);
        assert!(caps.tensor_observables);
        assert!(caps.inverse_operations);
        assert!(caps.is_simulator);
        let (hw, _) = device(Target::Device, 3, 10);
        assert!(!hw.capabilities().is_simulator);
    }

    #[tokio::test]
    async fn test_apply_submits_and_polls() {
        let (mut dev, transport) = device(Target::Simulator, 3, 4);
        transport
            .respond(200, json!({"id": "job-1", "status": "queued"}))
            .respond(200, json!({"id": "job-1", "status": "ongoing"}))
            .respond(
                200,
                json!({"id": "job-1", "status": "finished", "samples": [5, 0, 7, 2]}),
            );

        let ops = vec![
            Operation::basis_state(&[1, 0, 1], vec![0, 1, 2]),
            Operation::new("RX", vec![PI / 2.0], vec![1]),
        ];
        let rotations = vec![Operation::fixed("Hadamard", vec![0])];
        dev.apply(&ops, &rotations).await.unwrap();

        assert_eq!(
            dev.circuit_json(),
            r#"[["X",1.0,[0]],["X",1.0,[2]],["X",0.5,[1]],["Y",0.5,[0]]]"#
        );
        assert_eq!(dev.raw_samples(), Some(&[5, 0, 7, 2][..]));

        let requests = transport.requests();
        assert_eq!(requests.len(), 3);
        assert_eq!(
            requests[0].body,
            json!({
                "access_token": "test-key",
                "no_qubits": 3,
                "repetitions": 4,
                "data": dev.circuit_json(),
            })
        );
        assert_eq!(
            requests[1].body,
            json!({"id": "job-1", "access_token": "test-key"})
        );

        let job = dev.last_job().unwrap();
        assert_eq!(job.id.0, "job-1");
        assert_eq!(job.polls, 2);
        assert!(job.finished_at.is_some());

        let samples = dev.generate_samples().unwrap();
        assert_eq!(
            bits(&samples),
            vec![vec![1, 0, 1], vec![0, 0, 0], vec![1, 1, 1], vec![0, 1, 0]]
        );
    }

    #[tokio::test]
    async fn test_state_preparation_must_come_first() {
        let (mut dev, transport) = device(Target::Simulator, 2, 10);
        let ops = vec![
            Operation::new("RX", vec![0.1], vec![0]),
            Operation::basis_state(&[1, 1], vec![0, 1]),
        ];

        let err = dev.apply(&ops, &[]).await.unwrap_err();

        assert!(matches!(err, DeviceError::OperationOrdering(name) if name == "BasisState"));
        assert!(transport.requests().is_empty());
        assert!(dev.circuit().is_empty());
    }

    #[tokio::test]
    async fn test_state_vector_must_come_first() {
        let (mut dev, transport) = device(Target::Simulator, 1, 10);
        let ops = vec![
            Operation::fixed("Hadamard", vec![0]),
            Operation::new("QubitStateVector", vec![1.0, 0.0], vec![0]),
        ];

        let err = dev.apply(&ops, &[]).await.unwrap_err();

        assert!(matches!(err, DeviceError::OperationOrdering(_)));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_unsupported_operation_makes_no_request() {
        let (mut dev, transport) = device(Target::Simulator, 2, 10);
        let ops = vec![Operation::fixed("CNOT", vec![0, 1])];

        let err = dev.apply(&ops, &[]).await.unwrap_err();

        assert!(matches!(err, DeviceError::UnsupportedOperation(name) if name == "CNOT"));
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_gateway_error_skips_polling() {
        let (mut dev, transport) = device(Target::Device, 1, 10);
        transport.respond_text(401, "Access denied due to invalid subscription key");

        let err = dev
            .apply(&[Operation::fixed("PauliX", vec![0])], &[])
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            DeviceError::Gateway { status: 401, ref body } if body.contains("invalid subscription key")
        ));
        assert_eq!(transport.requests().len(), 1);
        assert!(dev.raw_samples().is_none());
        assert!(dev.last_job().is_none());
    }

    #[tokio::test]
    async fn test_poll_timeout_is_reported() {
        let (mut dev, transport) = device(Target::Simulator, 1, 10);
        for _ in 0..6 {
            transport.respond(200, json!({"id": "job-9", "status": "queued"}));
        }

        let err = dev
            .apply(&[Operation::fixed("PauliZ", vec![0])], &[])
            .await
            .unwrap_err();

        assert!(matches!(err, DeviceError::Timeout(id) if id == "job-9"));
        let job = dev.last_job().unwrap();
        assert_eq!(job.polls, 5);
        assert!(dev.raw_samples().is_none());
    }

    #[tokio::test]
    async fn test_reset_clears_state_and_restores_shots() {
        let (mut dev, transport) = device(Target::Simulator, 2, 50);
        transport.respond(
            200,
            json!({"id": "job-1", "status": "finished", "samples": [1, 2]}),
        );

        dev.set_shots(2);
        dev.apply(&[Operation::fixed("PauliX", vec![0])], &[])
            .await
            .unwrap();
        assert_eq!(transport.requests()[0].body["repetitions"], 2);
        assert!(!dev.circuit().is_empty());
        assert!(dev.raw_samples().is_some());

        dev.reset().unwrap();

        assert_eq!(dev.shots(), 50);
        assert!(dev.circuit().is_empty());
        assert!(dev.circuit_json().is_empty());
        assert!(dev.raw_samples().is_none());
        assert!(dev.last_job().is_none());
        assert!(matches!(dev.generate_samples(), Err(DeviceError::NoSamples)));
    }

    #[tokio::test]
    async fn test_failed_translation_leaves_device_unchanged() {
        let (mut dev, transport) = device(Target::Simulator, 2, 5);
        transport.respond(
            200,
            json!({"id": "job-1", "status": "finished", "samples": [1]}),
        );
        dev.apply(&[Operation::fixed("PauliX", vec![0])], &[])
            .await
            .unwrap();
        let json_before = dev.circuit_json().to_string();

        let ops = vec![
            Operation::fixed("Hadamard", vec![1]),
            Operation::fixed("CNOT", vec![0, 1]),
        ];
        let err = dev.apply(&ops, &[]).await.unwrap_err();

        assert!(matches!(err, DeviceError::UnsupportedOperation(_)));
        assert_eq!(dev.circuit().len(), 1);
        assert_eq!(dev.circuit_json(), json_before);
        assert_eq!(dev.raw_samples(), Some(&[1][..]));
        assert_eq!(transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_nan_angle_makes_no_request() {
        let (mut dev, transport) = device(Target::Simulator, 1, 5);

        let err = dev
            .apply(&[Operation::new("RX", vec![f64::NAN], vec![0])], &[])
            .await
            .unwrap_err();

        assert!(matches!(err, DeviceError::InvalidParameters { ref operation, .. } if operation == "RX"));
        assert!(transport.requests().is_empty());
        assert!(dev.circuit_json().is_empty());
    }

    #[tokio::test]
    async fn test_submission_without_job_id_fails_fast() {
        let (mut dev, transport) = device(Target::Simulator, 1, 5);
        transport.respond(200, json!({"status": "queued"}));

        let err = dev
            .apply(&[Operation::fixed("PauliX", vec![0])], &[])
            .await
            .unwrap_err();

        assert!(matches!(err, DeviceError::JobFailed(msg) if msg.contains("no job id")));
        assert_eq!(transport.requests().len(), 1);
        assert!(dev.last_job().is_none());
    }

    #[tokio::test]
    async fn test_execute_runs_full_cycle() {
        let (mut dev, transport) = device(Target::NoisySimulator, 2, 3);
        transport.respond(
            200,
            json!({"id": "job-2", "status": "finished", "samples": [3, 3, 0]}),
        );

        let ops = vec![
            Operation::fixed("Hadamard", vec![0]),
            Operation::new("MS", vec![0.5], vec![0, 1]),
        ];
        let samples = dev.execute(&ops, &[]).await.unwrap();

        assert_eq!(samples.num_shots(), 3);
        assert_eq!(samples.counts().get("11"), 2);
        assert_eq!(samples.counts().get("00"), 1);
    }

    #[tokio::test]
    async fn test_execute_rejects_unadvertised_rotation() {
        let (mut dev, transport) = device(Target::Simulator, 1, 3);
        let rotations = vec![Operation::fixed("S", vec![0])];

        let err = dev.execute(&[], &rotations).await.unwrap_err();

        assert!(matches!(err, DeviceError::UnsupportedOperation(name) if name == "S"));
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_generate_samples_rejects_out_of_range() {
        let (mut dev, _) = device(Target::Simulator, 2, 1);
        dev.samples = Some(vec![4]);
        assert!(matches!(
            dev.generate_samples(),
            Err(DeviceError::InvalidSample { sample: 4, num_wires: 2 })
        ));
    }

    #[test]
    fn test_generate_samples_reversed_bit_order() {
        let (mut dev, _) = device(Target::Simulator, 3, 1);
        dev.samples = Some(vec![5]);
        let samples = dev.generate_samples().unwrap();
        assert_eq!(bits(&samples), vec![vec![1, 0, 1]]);
    }

    #[test]
    fn test_from_config() {
        let config = DeviceConfig::new("aqt.sim")
            .with_token("cfg-key")
            .with_endpoint("https://gateway.test/marmot")
            .with_extra("wires", json!(4))
            .with_extra("shots", json!(25))
            .with_extra("max_polls", json!(3));

        let dev = AqtDevice::from_config(config).unwrap();

        assert_eq!(dev.target(), Target::Simulator);
        assert_eq!(dev.num_wires(), 4);
        assert_eq!(dev.shots(), 25);
        assert_eq!(dev.hostname(), "https://gateway.test/marmot/sim/");
        assert_eq!(dev.client.poll_policy().max_polls, Some(3));
    }

    #[test]
    fn test_from_config_requires_wires() {
        let config = DeviceConfig::new("aqt.sim").with_token("cfg-key");
        assert!(matches!(
            AqtDevice::from_config(config),
            Err(DeviceError::Configuration(_))
        ));
    }

    #[test]
    fn test_from_config_unknown_target() {
        let config = DeviceConfig::new("aqt.nope")
            .with_token("cfg-key")
            .with_extra("wires", json!(1));
        assert!(matches!(
            AqtDevice::from_config(config),
            Err(DeviceError::UnknownDevice(_))
        ));
    }
}
