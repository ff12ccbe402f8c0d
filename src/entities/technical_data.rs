//! Technical data recorded for each element, one schema per installation type.
//!
//! The store keeps the externally tagged form so a row is self-describing.
//! Over the wire the payload travels untagged next to the element's
//! `installationType`, which is what [`TechnicalData::from_payload`] and
//! [`Payload`] translate between.

use super::sea_orm_active_enums::InstallationType;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize, Serializer};

/// Typed technical data, keyed by installation type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult)]
pub enum TechnicalData {
    /// `CIRCUITOS DE VÍA`
    TrackCircuit(TrackCircuitData),
    /// `MOTORES`
    PointMotor(PointMotorData),
    /// `SEÑALES Y ASFA`
    Signal(SignalData),
    /// `PN`
    LevelCrossing(LevelCrossingData),
    /// `BATERIAS`
    Battery(GenericData),
    /// `ENCLAVAMIENTO`
    Interlocking(GenericData),
}

impl TechnicalData {
    /// Empty payload for the given installation type.
    #[must_use]
    pub fn empty(kind: InstallationType) -> Self {
        match kind {
            InstallationType::TrackCircuits => Self::TrackCircuit(TrackCircuitData::default()),
            InstallationType::PointMotors => Self::PointMotor(PointMotorData::default()),
            InstallationType::Signals => Self::Signal(SignalData::default()),
            InstallationType::LevelCrossings => Self::LevelCrossing(LevelCrossingData::default()),
            InstallationType::Batteries => Self::Battery(GenericData::default()),
            InstallationType::Interlockings => Self::Interlocking(GenericData::default()),
        }
    }

    /// Parses an untagged wire payload against the schema of `kind`.
    ///
    /// `null` yields the empty payload. Unknown keys are ignored; keys of the
    /// wrong shape (e.g. an object where a string is expected) are rejected.
    pub fn from_payload(
        kind: InstallationType,
        payload: serde_json::Value,
    ) -> Result<Self, serde_json::Error> {
        if payload.is_null() {
            return Ok(Self::empty(kind));
        }
        Ok(match kind {
            InstallationType::TrackCircuits => Self::TrackCircuit(serde_json::from_value(payload)?),
            InstallationType::PointMotors => Self::PointMotor(serde_json::from_value(payload)?),
            InstallationType::Signals => Self::Signal(serde_json::from_value(payload)?),
            InstallationType::LevelCrossings => {
                Self::LevelCrossing(serde_json::from_value(payload)?)
            }
            InstallationType::Batteries => Self::Battery(serde_json::from_value(payload)?),
            InstallationType::Interlockings => Self::Interlocking(serde_json::from_value(payload)?),
        })
    }

    /// Installation type this payload belongs to.
    #[must_use]
    pub const fn installation_type(&self) -> InstallationType {
        match self {
            Self::TrackCircuit(_) => InstallationType::TrackCircuits,
            Self::PointMotor(_) => InstallationType::PointMotors,
            Self::Signal(_) => InstallationType::Signals,
            Self::LevelCrossing(_) => InstallationType::LevelCrossings,
            Self::Battery(_) => InstallationType::Batteries,
            Self::Interlocking(_) => InstallationType::Interlockings,
        }
    }

    /// Free-text agent names typed into the last inspection form, if any.
    #[must_use]
    pub fn last_agents(&self) -> Option<&str> {
        match self {
            Self::TrackCircuit(d) => d.last_agents.as_deref(),
            Self::PointMotor(d) => d.last_agents.as_deref(),
            Self::Signal(d) => d.last_agents.as_deref(),
            Self::LevelCrossing(d) => d.last_agents.as_deref(),
            Self::Battery(d) | Self::Interlocking(d) => d.last_agents.as_deref(),
        }
    }

    /// Borrowed view that serializes without the variant tag.
    #[must_use]
    pub const fn payload(&self) -> Payload<'_> {
        Payload(self)
    }
}

/// Untagged serialization of a [`TechnicalData`].
#[derive(Debug, Clone, Copy)]
pub struct Payload<'a>(&'a TechnicalData);

impl Serialize for Payload<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            TechnicalData::TrackCircuit(d) => d.serialize(serializer),
            TechnicalData::PointMotor(d) => d.serialize(serializer),
            TechnicalData::Signal(d) => d.serialize(serializer),
            TechnicalData::LevelCrossing(d) => d.serialize(serializer),
            TechnicalData::Battery(d) | TechnicalData::Interlocking(d) => d.serialize(serializer),
        }
    }
}

/// Track circuit readings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TrackCircuitData {
    /// Kilometre point
    pub pk: Option<String>,
    /// Agents on the last inspection
    pub last_agents: Option<String>,
    /// Carrier frequency
    #[serde(rename = "frecuencia")]
    pub frequency: Option<String>,
    /// Filter voltage (3/4)
    #[serde(rename = "filtro")]
    pub filter: Option<String>,
    /// Receiver voltages
    #[serde(rename = "receptores")]
    pub receivers: Triple,
    /// Relay voltages
    #[serde(rename = "reles")]
    pub relays: Triple,
    /// Shunt test readings
    pub shunt: ShuntReadings,
    /// Collateral readings
    #[serde(rename = "colaterales")]
    pub collaterals: Collaterals,
}

/// Three-phase style reading (`i1`..`i3`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Triple {
    pub i1: Option<String>,
    pub i2: Option<String>,
    pub i3: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShuntReadings {
    pub asu: Option<String>,
    #[serde(rename = "parasitas")]
    pub parasitic: Option<String>,
}

/// Collateral readings; `c4` is the "Col Up" reading.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Collaterals {
    pub c1: Option<String>,
    pub c2: Option<String>,
    pub c3: Option<String>,
    pub c4: Option<String>,
}

/// Point motor readings for both throw directions.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PointMotorData {
    pub pk: Option<String>,
    pub last_agents: Option<String>,
    /// Movement to normal
    pub normal: MotorMovement,
    /// Movement to reverse
    #[serde(rename = "invertido")]
    pub reverse: MotorMovement,
}

/// Throw times and currents with (CG) and without (SG) load, plus voltage.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotorMovement {
    pub tcg: Option<String>,
    pub tsg: Option<String>,
    pub icg: Option<String>,
    pub isg: Option<String>,
    pub v: Option<String>,
}

/// Signal head, connection unit and ASFA beacon readings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SignalData {
    pub pk: Option<String>,
    pub last_agents: Option<String>,
    #[serde(rename = "focos")]
    pub lamps: Lamps,
    #[serde(rename = "uc")]
    pub connection_unit: ConnectionUnit,
    #[serde(rename = "balizaPie")]
    pub foot_beacon: FootBeacon,
    #[serde(rename = "balizaPrevia")]
    pub advance_beacon: AdvanceBeacon,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Lamps {
    /// Lamp technology: "Modular", "Ind. Normal" or "LED"
    #[serde(rename = "tipo")]
    pub kind: Option<String>,
    #[serde(rename = "rojo")]
    pub red: LampReading,
    #[serde(rename = "blanco")]
    pub white: LampReading,
    #[serde(rename = "verde")]
    pub green: LampReading,
    #[serde(rename = "amarillo")]
    pub yellow: LampReading,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LampReading {
    pub ve: Option<String>,
    pub vlamp: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConnectionUnit {
    /// Unit model: "UCS", "UCD" or "UCT"
    pub uc: Option<String>,
    #[serde(rename = "verde")]
    pub green: ConnectionOutput,
    #[serde(rename = "amarillo")]
    pub yellow: ConnectionOutput,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionOutput {
    pub tsb: Option<String>,
    pub comp_alt: Option<String>,
    pub baliza: Option<String>,
    pub reparto: Option<bool>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FootBeacon {
    pub l8: BeaconReading,
    pub l3: BeaconReading,
    pub l1: BeaconReading,
    #[serde(rename = "carril")]
    pub rail: RailOffset,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdvanceBeacon {
    pub l7: BeaconReading,
    pub l3: BeaconReading,
    pub l1: BeaconReading,
    #[serde(rename = "carril")]
    pub rail: RailOffset,
}

/// Frequency deviation (absolute and percent) and mounting height.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BeaconReading {
    #[serde(rename = "desvF")]
    pub deviation_freq: Option<String>,
    #[serde(rename = "desvP")]
    pub deviation_percent: Option<String>,
    #[serde(rename = "altura")]
    pub height: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RailOffset {
    #[serde(rename = "dist")]
    pub distance: Option<String>,
    #[serde(rename = "altura")]
    pub height: Option<String>,
}

/// Level crossing data.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LevelCrossingData {
    pub pk: Option<String>,
    pub last_agents: Option<String>,
    /// Maintenance contractor
    #[serde(rename = "contrata")]
    pub contractor: Option<String>,
}

/// Schema shared by installation types without dedicated readings.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenericData {
    pub pk: Option<String>,
    pub last_agents: Option<String>,
}
