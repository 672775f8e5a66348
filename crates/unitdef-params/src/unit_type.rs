//! Unit type codes (`ty`).

use std::fmt;
use std::str::FromStr;

use unitdef_tree::Parameter;

use crate::values::Values;
use crate::{DecodeError, Decoder};

macro_rules! unit_types {
    ($($variant:ident => $code:literal, $description:literal;)*) => {
        /// Kind of a unit, as given by its `ty` parameter.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        #[non_exhaustive]
        pub enum UnitType {
            $(
                #[doc = $description]
                $variant,
            )*
        }

        impl UnitType {
            /// Every known unit type.
            pub const ALL: &'static [UnitType] = &[$(UnitType::$variant),*];

            /// The code written in the `ty` parameter.
            pub fn code(self) -> &'static str {
                match self {
                    $(UnitType::$variant => $code,)*
                }
            }

            /// Short human-readable description.
            pub fn description(self) -> &'static str {
                match self {
                    $(UnitType::$variant => $description,)*
                }
            }

            /// Look up a unit type by its code.
            pub fn from_code(code: &str) -> Option<Self> {
                match code {
                    $($code => Some(UnitType::$variant),)*
                    _ => None,
                }
            }
        }
    };
}

unit_types! {
    JobGroup => "g", "Job group";
    ManagerJobGroup => "mg", "Manager job group";
    Jobnet => "n", "Jobnet";
    RecoveryJobnet => "rn", "Recovery jobnet";
    RemoteJobnet => "rm", "Remote jobnet";
    RecoveryRemoteJobnet => "rr", "Recovery remote jobnet";
    JobnetConnector => "nc", "Jobnet connector";
    ManagerJobnet => "mn", "Manager jobnet";
    UnixJob => "j", "UNIX job";
    RecoveryUnixJob => "rj", "Recovery UNIX job";
    PcJob => "pj", "PC job";
    RecoveryPcJob => "rp", "Recovery PC job";
    QueueJob => "qj", "QUEUE job";
    RecoveryQueueJob => "rq", "Recovery QUEUE job";
    JudgmentJob => "jdj", "Judgment job";
    RecoveryJudgmentJob => "rjdj", "Recovery judgment job";
    OrJob => "orj", "OR job";
    RecoveryOrJob => "rorj", "Recovery OR job";
    JP1EventReceptionMonitoringJob => "evwj", "JP1 event reception monitoring job";
    RecoveryJP1EventReceptionMonitoringJob => "revwj", "Recovery JP1 event reception monitoring job";
    FileMonitoringJob => "flwj", "File monitoring job";
    RecoveryFileMonitoringJob => "rflwj", "Recovery file monitoring job";
    EmailReceptionMonitoringJob => "mlwj", "Email reception monitoring job";
    RecoveryEmailReceptionMonitoringJob => "rmlwj", "Recovery email reception monitoring job";
    MqMessageReceptionMonitoringJob => "mqwj", "Message-queue message reception monitoring job";
    RecoveryMqMessageReceptionMonitoringJob => "rmqwj", "Recovery message-queue message reception monitoring job";
    MsmqMessageReceptionMonitoringJob => "mswj", "MSMQ message reception monitoring job";
    RecoveryMsmqMessageReceptionMonitoringJob => "rmswj", "Recovery MSMQ message reception monitoring job";
    LogFileMonitoringJob => "lfwj", "Log file monitoring job";
    RecoveryLogFileMonitoringJob => "rlfwj", "Recovery log file monitoring job";
    WindowsEventLogMonitoringJob => "ntwj", "Windows event log monitoring job";
    RecoveryWindowsEventLogMonitoringJob => "rntwj", "Recovery Windows event log monitoring job";
    ExecutionIntervalControlJob => "tmwj", "Execution interval control job";
    RecoveryExecutionIntervalControlJob => "rtmwj", "Recovery execution interval control job";
    JP1EventSendingJob => "evsj", "JP1 event sending job";
    RecoveryJP1EventSendingJob => "revsj", "Recovery JP1 event sending job";
    EmailSendingJob => "mlsj", "Email sending job";
    RecoveryEmailSendingJob => "rmlsj", "Recovery email sending job";
    MqMessageSendingJob => "mqsj", "Message-queue message sending job";
    RecoveryMqMessageSendingJob => "rmqsj", "Recovery message-queue message sending job";
    MsmqMessageSendingJob => "mssj", "MSMQ message sending job";
    RecoveryMsmqMessageSendingJob => "rmssj", "Recovery MSMQ message sending job";
    OpenViewStatusReportJob => "cmsj", "OpenView status report job";
    RecoveryOpenViewStatusReportJob => "rcmsj", "Recovery OpenView status report job";
    LocalPowerControlJob => "pwlj", "Local power control job";
    RecoveryLocalPowerControlJob => "rpwlj", "Recovery local power control job";
    RemotePowerControlJob => "pwrj", "Remote power control job";
    RecoveryRemotePowerControlJob => "rpwrj", "Recovery remote power control job";
    CustomJob => "cj", "Custom job";
    RecoveryCustomJob => "rcj", "Recovery custom job";
    CustomPcJob => "cpj", "Custom PC job";
    RecoveryCustomPcJob => "rcpj", "Recovery custom PC job";
    FlexibleJob => "fxj", "Flexible job";
    RecoveryFlexibleJob => "rfxj", "Recovery flexible job";
    HttpConnectionJob => "htpj", "HTTP connection job";
    RecoveryHttpConnectionJob => "rhtpj", "Recovery HTTP connection job";
}

impl UnitType {
    /// Whether this is a recovery unit.
    pub fn is_recovery(self) -> bool {
        let code = self.code();
        code.starts_with('r') && code != "rm"
    }

    /// Whether units of this type may contain other units.
    pub fn is_container(self) -> bool {
        matches!(
            self,
            UnitType::JobGroup
                | UnitType::ManagerJobGroup
                | UnitType::Jobnet
                | UnitType::RecoveryJobnet
                | UnitType::RemoteJobnet
                | UnitType::RecoveryRemoteJobnet
                | UnitType::ManagerJobnet
        )
    }
}

impl fmt::Display for UnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Error returned when parsing an unknown unit type code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownUnitType(pub String);

impl fmt::Display for UnknownUnitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown unit type `{}`", self.0)
    }
}

impl std::error::Error for UnknownUnitType {}

impl FromStr for UnitType {
    type Err = UnknownUnitType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UnitType::from_code(s).ok_or_else(|| UnknownUnitType(s.to_string()))
    }
}

/// Decoder for `ty`.
pub struct Ty;

impl Decoder for Ty {
    const NAME: &'static str = "ty";
    type Output = UnitType;

    fn decode_values(parameter: &Parameter) -> Result<UnitType, DecodeError> {
        let values = Values::new(parameter);
        let code = values.single()?;
        UnitType::from_code(code).ok_or_else(|| values.unknown_code(code))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique_and_round_trip() {
        for ty in UnitType::ALL {
            assert_eq!(UnitType::from_code(ty.code()), Some(*ty));
        }
        let mut codes: Vec<_> = UnitType::ALL.iter().map(|t| t.code()).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), UnitType::ALL.len());
    }

    #[test]
    fn test_recovery_and_containers() {
        assert!(UnitType::RecoveryUnixJob.is_recovery());
        assert!(!UnitType::RemoteJobnet.is_recovery());
        assert!(UnitType::RecoveryRemoteJobnet.is_recovery());
        assert!(UnitType::Jobnet.is_container());
        assert!(!UnitType::UnixJob.is_container());
        assert_eq!("pj".parse::<UnitType>(), Ok(UnitType::PcJob));
        assert!("x".parse::<UnitType>().is_err());
    }
}
