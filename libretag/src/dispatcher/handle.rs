// libretag/src/dispatcher/handle.rs

use chrono::Utc;
use log::{debug, info, warn};

use crate::constants::{IMAGE_BLOCKS, IMAGE_LEN};
use crate::dispatcher::{ActionRequest, Credentials, DispatcherConfig, Reading, SessionState};
use crate::protocol::{Command, activation_parameters, decrypt};
use crate::sensor::{SensorReading, SensorVariant};
use crate::tag::Tag;
use crate::transport::Transceiver;
use crate::types::{PatchInfo, SensorState};
use crate::utils::{bytes_to_hex_upper_spaced, fram_dump};
use crate::{Error, Result};

/// Single-session action dispatcher.
///
/// Owns the transceiver, the stored credentials and the session log. Each
/// call to [`Dispatcher::perform`] connects to a tag, runs the requested
/// action to completion and yields exactly one [`Reading`].
pub struct Dispatcher<T = Box<dyn Transceiver + Send>> {
    transceiver: T,
    credentials: Option<Credentials>,
    config: DispatcherConfig,
    state: SessionState,
    pending: Option<ActionRequest>,
    recovery_used: bool,
    log: Vec<String>,
}

/// What an executed action produced besides log lines.
#[derive(Default)]
struct Output {
    data: Vec<u8>,
    sensor_reading: Option<SensorReading>,
}

impl<T: Transceiver> Dispatcher<T> {
    /// Dispatcher with default options and no credentials.
    pub fn new(transceiver: T) -> Self {
        Self::with_config(transceiver, DispatcherConfig::default())
    }

    /// Dispatcher with explicit options.
    pub fn with_config(transceiver: T, config: DispatcherConfig) -> Self {
        Self {
            transceiver,
            credentials: None,
            config,
            state: SessionState::Idle,
            pending: None,
            recovery_used: false,
            log: Vec::new(),
        }
    }

    /// Store the unlock code and password used by write actions.
    pub fn set_credentials(&mut self, unlock_code: u32, password: impl Into<Vec<u8>>) {
        self.credentials = Some(Credentials::new(unlock_code, password));
    }

    /// Stored credentials, if any
    pub fn credentials(&self) -> Option<&Credentials> {
        self.credentials.as_ref()
    }

    /// Current options
    pub fn config(&self) -> &DispatcherConfig {
        &self.config
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Borrow the transceiver
    pub fn transceiver(&self) -> &T {
        &self.transceiver
    }

    /// Mutably borrow the transceiver
    pub fn transceiver_mut(&mut self) -> &mut T {
        &mut self.transceiver
    }

    /// Consume the dispatcher and return its transceiver.
    pub fn into_transceiver(self) -> T {
        self.transceiver
    }

    /// Run `request` against the next tag and return its reading.
    ///
    /// Tag and protocol failures are reported inside the reading; the only
    /// error returned here is [`Error::SessionBusy`].
    pub fn perform(&mut self, request: ActionRequest) -> Result<Reading> {
        if self.state != SessionState::Idle || self.pending.is_some() {
            return Err(Error::SessionBusy);
        }
        info!("performing {}", request);
        self.log.clear();
        self.recovery_used = false;
        self.pending = Some(request.clone());
        self.log("Start processing...");
        self.transition(SessionState::SessionActive);

        let (result, tag) = match self.transceiver.connect() {
            Ok(handle) => {
                let tag = Tag::new(handle);
                (self.process_tag(&tag, request), Some(tag))
            }
            Err(e) => (Err(e), None),
        };

        let mut reading = Reading::default();
        match result {
            Ok(output) => {
                self.log("Completed");
                if let Some(tag) = &tag {
                    self.transceiver.invalidate(tag.handle(), None);
                }
                reading.data = output.data;
                reading.sensor_reading = output.sensor_reading;
                self.transition(SessionState::Completed);
            }
            Err(e) => {
                let message = e.to_string();
                warn!("action failed: {}", message);
                self.log(format!("Error: {}", message));
                if let Some(tag) = &tag {
                    self.transceiver.invalidate(tag.handle(), Some(&message));
                }
                reading.failure = Some(message);
                self.transition(SessionState::Failed);
            }
        }

        reading.state = self.state;
        reading.log = std::mem::take(&mut self.log);
        self.pending = None;
        self.transition(SessionState::Idle);
        Ok(reading)
    }

    fn transition(&mut self, next: SessionState) {
        debug!("session state {} -> {}", self.state, next);
        self.state = next;
    }

    fn log(&mut self, line: impl Into<String>) {
        let line = line.into();
        info!("{}", line);
        self.log.push(line);
    }

    fn process_tag(&mut self, tag: &Tag, mut action: ActionRequest) -> Result<Output> {
        self.log("Tag connected");
        self.log(format!("UID: {}", tag.uid().to_hex()));

        loop {
            let info = tag.patch_info(&mut self.transceiver)?;

            if info.is_empty() && action != ActionRequest::Recover {
                if !self.config.auto_recover || self.recovery_used {
                    return Err(Error::TagDamaged);
                }
                warn!("empty patch info from {}, switching to recovery", tag.uid().to_hex());
                self.log("Tag damaged, trying to recover");
                self.recovery_used = true;
                action = ActionRequest::Recover;
                self.pending = Some(action.clone());
                self.transition(SessionState::RecoveringOnce);
                continue;
            }

            self.transition(SessionState::PatchInfoFetched);
            let variant = SensorVariant::from_patch_info(&info);
            self.log(format!("Patch Info: {}", info.to_hex()));
            self.log(format!("Type: {}", variant));
            self.log(format!("Region: {}", info.region()));

            self.transition(SessionState::Executing);
            return self.execute(tag, &action, &info, variant);
        }
    }

    fn execute(
        &mut self,
        tag: &Tag,
        action: &ActionRequest,
        info: &PatchInfo,
        variant: SensorVariant,
    ) -> Result<Output> {
        let mut output = Output::default();
        match action {
            ActionRequest::ReadState => {
                let data = tag.read_fram(&mut self.transceiver, variant.state_read_blocks());
                let plain = plaintext(tag, variant, info, &data)?;
                self.log_state(&plain);
                output.data = data;
            }
            ActionRequest::ReadFram => {
                let data = tag.read_fram(&mut self.transceiver, self.config.fram_blocks);
                let plain = plaintext(tag, variant, info, &data)?;
                self.log_state(&plain);
                self.log("FRAM dump:");
                for line in fram_dump(&data).lines() {
                    self.log(line);
                }
                output.data = data;
            }
            ActionRequest::ReadHistory => {
                let data = tag.read_fram(&mut self.transceiver, IMAGE_BLOCKS as u8);
                let plain = plaintext(tag, variant, info, &data)?;
                self.log_state(&plain);
                let reading = SensorReading::decode(&plain, *tag.uid(), Utc::now(), Some(&info.to_hex()))?;
                self.log(format!("Age: {}", reading.human_readable_age()));
                self.log(format!("History: {:?}", reading.glucose_history()));
                self.log(format!("Trend: {:?}", reading.glucose_trend()));
                output.data = data;
                output.sensor_reading = Some(reading);
            }
            ActionRequest::Reset => {
                let creds = self.require_credentials()?;
                require_writable(variant)?;
                tag.reinitialize(&mut self.transceiver, variant, creds.unlock_code, &creds.password)?;
                self.log("Sensor restarted successfully");
            }
            ActionRequest::Activate => {
                let parameters = if variant.is_writable() {
                    self.credentials
                        .as_ref()
                        .map(|c| c.password.clone())
                        .ok_or(Error::MissingUnlockParameters)?
                } else if variant.is_encrypted() {
                    activation_parameters(tag.uid()).to_vec()
                } else {
                    return Err(Error::UnsupportedSensorType);
                };
                tag.activate(&mut self.transceiver, &parameters)?;
                self.log("Sensor activated successfully");
            }
            ActionRequest::ChangeRegion(region) => {
                let creds = self.require_credentials()?;
                require_writable(variant)?;
                tag.change_region(
                    &mut self.transceiver,
                    variant,
                    *region,
                    creds.unlock_code,
                    &creds.password,
                )?;
                self.log(format!("Region changed to {}", region));
            }
            ActionRequest::RemoveLifetimeLimitation => {
                let creds = self.require_credentials()?;
                require_writable(variant)?;
                tag.remove_lifetime_limit(&mut self.transceiver, variant, creds.unlock_code, &creds.password)?;
                self.log("Lifetime limitation removed");
            }
            ActionRequest::Recover => {
                let creds = self.require_credentials()?;
                // only a damaged tag falls back to its crc block
                let variant = if info.is_empty() {
                    self.variant_from_crc_block(tag)?
                } else {
                    require_writable(variant)?;
                    variant
                };
                tag.restore(&mut self.transceiver, variant, &creds.password)?;
                self.log(format!("Sensor recovered as {}", variant));
            }
            ActionRequest::Custom { code, payload } => {
                let cmd = Command::Custom {
                    code: *code,
                    payload: payload.clone().unwrap_or_default(),
                };
                let resp = tag.run(&mut self.transceiver, &cmd)?;
                self.log(format!("Response: {}", bytes_to_hex_upper_spaced(&resp)));
                output.data = resp;
            }
            ActionRequest::ReadBlock(number) => {
                let block = tag.read_block(&mut self.transceiver, *number)?;
                self.log(format!("Block {:02X}: {}", number, block.to_hex()));
                output.data = block.as_bytes().to_vec();
            }
            ActionRequest::WriteBlock(number, block) => {
                tag.write_block(&mut self.transceiver, *number, block)?;
                self.log(format!("Block {:02X} written: {}", number, block.to_hex()));
            }
        }
        Ok(output)
    }

    fn require_credentials(&self) -> Result<Credentials> {
        self.credentials.clone().ok_or(Error::MissingUnlockParameters)
    }

    /// Identify a writable variant from its crc block when patch info is
    /// unusable.
    fn variant_from_crc_block(&mut self, tag: &Tag) -> Result<SensorVariant> {
        let number = SensorVariant::Libre1.crc_block_number();
        let block = tag.read_block(&mut self.transceiver, number)?;
        let variant = SensorVariant::from_crc_block(&block).ok_or(Error::UnsupportedSensorType)?;
        self.log(format!("Type from crc block: {}", variant));
        Ok(variant)
    }

    fn log_state(&mut self, plain: &[u8]) {
        let state = plain.get(4).map_or(SensorState::Unknown, |&b| SensorState::from_byte(b));
        self.log(format!("Sensor state: {} ({})", state, state.code()));
    }
}

fn require_writable(variant: SensorVariant) -> Result<()> {
    if variant.is_writable() {
        Ok(())
    } else {
        Err(Error::UnsupportedSensorType)
    }
}

/// Decrypt the leading memory image of an encrypted variant; other variants
/// are returned as read.
fn plaintext(tag: &Tag, variant: SensorVariant, info: &PatchInfo, data: &[u8]) -> Result<Vec<u8>> {
    if !variant.is_encrypted() {
        return Ok(data.to_vec());
    }
    let image = data.get(..IMAGE_LEN).ok_or(Error::InvalidLength {
        expected: IMAGE_LEN,
        actual: data.len(),
    })?;
    decrypt(variant, tag.uid(), info.as_bytes(), image)
}
