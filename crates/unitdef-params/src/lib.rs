//! Typed decoders for JP1/AJS unit definition parameters.
//!
//! Each decoder reads the raw values of one parameter name and returns a
//! typed value. Decoders never look at anything but the [`Parameter`] they
//! are given, so a broken parameter never prevents decoding another one.
//!
//! ```
//! use unitdef_params::{Decoder, Sd, St, decode_first};
//!
//! let unit = unitdef_tree::parse_one("unit=N;{ty=n;sd=1,10/05;st=+08:30;}").unwrap();
//! let st = decode_first::<St>(&unit).unwrap().unwrap();
//! assert!(st.relative);
//! assert_eq!(st.time.to_string(), "08:30");
//! assert!(Sd::decode(unit.parameter("sd").unwrap()).is_ok());
//! ```

use tracing::debug;
use unitdef_tree::{Parameter, Unit};

mod arrow;
mod codes;
mod date;
mod env;
mod error;
mod judgment;
mod layout;
mod limits;
mod mail;
mod time;
mod unit_type;
mod values;

pub use arrow::{Ar, Arrow, ConnectionType};
pub use codes::{
    ConnectorSync, DeleteOption, Ej, Eu, ExecutionUserType, Ha, HoldType, Jd, JudgmentCondition,
    Ncex, Ncl, Ncs, ResultJudgmentType, Sea, Soa, Top1, Top2, Top3, Top4, WriteOption,
};
pub use date::{
    CountingMethod, DateDesignation, DayOfWeek, DaySpec, MonthDay, ScheduleDate, Sd, StartDate,
    WeekOfMonth,
};
pub use env::{Env, EnvironmentVariable};
pub use error::{DecodeError, DecodeErrorKind};
pub use judgment::{Ejc, Ejf, Eji, Ejt, Ejv, MAX_JUDGMENT_INTEGER};
pub use layout::{El, Element, MapSize, Sz};
pub use limits::{Etm, ExecutionTimeout, ExitCodeThreshold, Fd, FixedDuration, Minutes, Tho, Wth};
pub use mail::{AddressKind, MailAddress, Mladr};
pub use time::{
    DelayTime, EndDelayTime, Ey, StartDelayTime, StartTime, St, Sy, Time, TimingMethod,
};
pub use unit_type::{Ty, UnitType, UnknownUnitType};
pub use values::RuleNumber;

/// Decodes the values of one parameter name into a typed value.
pub trait Decoder {
    /// The parameter name this decoder handles.
    const NAME: &'static str;

    /// The decoded value.
    type Output;

    /// Decode `parameter`, which must be named [`Self::NAME`].
    fn decode(parameter: &Parameter) -> Result<Self::Output, DecodeError> {
        if parameter.name() != Self::NAME {
            return Err(DecodeError::new(
                parameter.name(),
                DecodeErrorKind::WrongParameter {
                    expected: Self::NAME,
                },
            ));
        }
        Self::decode_values(parameter)
    }

    /// Decode the values of a parameter whose name is already checked.
    fn decode_values(parameter: &Parameter) -> Result<Self::Output, DecodeError>;
}

/// Decode the first parameter named [`Decoder::NAME`] in `unit`, if any.
pub fn decode_first<D: Decoder>(unit: &Unit) -> Result<Option<D::Output>, DecodeError> {
    unit.parameter(D::NAME).map(D::decode).transpose()
}

/// Decode every parameter named [`Decoder::NAME`] in `unit`, in source order.
///
/// Each item is decoded independently.
pub fn decode_all<D: Decoder>(unit: &Unit) -> impl Iterator<Item = Result<D::Output, DecodeError>> {
    unit.parameters_named(D::NAME).map(D::decode)
}

/// A decoded parameter of any known name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decoded {
    UnitType(UnitType),
    Element(Element),
    MapSize(MapSize),
    StartDate(StartDate),
    StartTime(StartTime),
    StartDelayTime(StartDelayTime),
    EndDelayTime(EndDelayTime),
    Arrow(Arrow),
    ExecutionUserType(ExecutionUserType),
    ResultJudgmentType(ResultJudgmentType),
    HoldType(HoldType),
    FixedDuration(FixedDuration),
    ExecutionTimeout(ExecutionTimeout),
    AbnormalThreshold(ExitCodeThreshold),
    WarningThreshold(ExitCodeThreshold),
    MailAddress(MailAddress),
    StdoutWriteOption(WriteOption),
    StderrWriteOption(WriteOption),
    /// `top1`..`top4`, with the file number.
    DeleteOption(u8, DeleteOption),
    JudgmentCondition(JudgmentCondition),
    JudgmentExitCode(u32),
    JudgmentInteger(u32),
    JudgmentVariable(String),
    JudgmentText(String),
    JudgmentFile(String),
    ConnectorOrdering(bool),
    ConnectorSync(ConnectorSync),
    ConnectorAcrossEnvironments(bool),
    Environment(Vec<EnvironmentVariable>),
}

/// Decode `parameter` with the decoder registered for its name.
pub fn decode(parameter: &Parameter) -> Result<Decoded, DecodeError> {
    let name = parameter.name();
    debug!(parameter = name, "decode");
    let decoded = match name {
        "ty" => Decoded::UnitType(Ty::decode(parameter)?),
        "el" => Decoded::Element(El::decode(parameter)?),
        "sz" => Decoded::MapSize(Sz::decode(parameter)?),
        "sd" => Decoded::StartDate(Sd::decode(parameter)?),
        "st" => Decoded::StartTime(St::decode(parameter)?),
        "sy" => Decoded::StartDelayTime(Sy::decode(parameter)?),
        "ey" => Decoded::EndDelayTime(Ey::decode(parameter)?),
        "ar" => Decoded::Arrow(Ar::decode(parameter)?),
        "eu" => Decoded::ExecutionUserType(Eu::decode(parameter)?),
        "jd" => Decoded::ResultJudgmentType(Jd::decode(parameter)?),
        "ha" => Decoded::HoldType(Ha::decode(parameter)?),
        "fd" => Decoded::FixedDuration(Fd::decode(parameter)?),
        "etm" => Decoded::ExecutionTimeout(Etm::decode(parameter)?),
        "tho" => Decoded::AbnormalThreshold(Tho::decode(parameter)?),
        "wth" => Decoded::WarningThreshold(Wth::decode(parameter)?),
        "mladr" => Decoded::MailAddress(Mladr::decode(parameter)?),
        "soa" => Decoded::StdoutWriteOption(Soa::decode(parameter)?),
        "sea" => Decoded::StderrWriteOption(Sea::decode(parameter)?),
        "top1" => Decoded::DeleteOption(1, Top1::decode(parameter)?),
        "top2" => Decoded::DeleteOption(2, Top2::decode(parameter)?),
        "top3" => Decoded::DeleteOption(3, Top3::decode(parameter)?),
        "top4" => Decoded::DeleteOption(4, Top4::decode(parameter)?),
        "ej" => Decoded::JudgmentCondition(Ej::decode(parameter)?),
        "ejc" => Decoded::JudgmentExitCode(Ejc::decode(parameter)?),
        "eji" => Decoded::JudgmentInteger(Eji::decode(parameter)?),
        "ejv" => Decoded::JudgmentVariable(Ejv::decode(parameter)?),
        "ejt" => Decoded::JudgmentText(Ejt::decode(parameter)?),
        "ejf" => Decoded::JudgmentFile(Ejf::decode(parameter)?),
        "ncl" => Decoded::ConnectorOrdering(Ncl::decode(parameter)?),
        "ncs" => Decoded::ConnectorSync(Ncs::decode(parameter)?),
        "ncex" => Decoded::ConnectorAcrossEnvironments(Ncex::decode(parameter)?),
        "env" => Decoded::Environment(Env::decode(parameter)?),
        _ => {
            return Err(DecodeError::new(name, DecodeErrorKind::NoDecoder));
        }
    };
    Ok(decoded)
}

/// Whether [`decode`] knows the parameter name.
pub fn has_decoder(name: &str) -> bool {
    matches!(
        name,
        "ty"
            | "el"
            | "sz"
            | "sd"
            | "st"
            | "sy"
            | "ey"
            | "ar"
            | "eu"
            | "jd"
            | "ha"
            | "fd"
            | "etm"
            | "tho"
            | "wth"
            | "mladr"
            | "soa"
            | "sea"
            | "top1"
            | "top2"
            | "top3"
            | "top4"
            | "ej"
            | "ejc"
            | "eji"
            | "ejv"
            | "ejt"
            | "ejf"
            | "ncl"
            | "ncs"
            | "ncex"
            | "env"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    const JOBNET: &str = r#"unit=NET,,jp1admin,;{ty=n;sz=10x8;el=JOB1,j,+240 +96;el=JOB2,pj,+400 +96;ar=(f=JOB1,t=JOB2);sd=1,10/05;st=+08:30;sy=2,U30;unit=JOB1,,,;{ty=j;sc="/bin/true";eu=ent;tho=1;}unit=JOB2,,,;{ty=pj;jd=nml;top1=del;}}"#;

    #[test]
    fn test_registry_dispatches_on_name() {
        let net = unitdef_tree::parse_one(JOBNET).unwrap();
        let decoded: Vec<_> = net
            .parameters()
            .iter()
            .map(|p| decode(p).unwrap())
            .collect();
        assert_eq!(decoded[0], Decoded::UnitType(UnitType::Jobnet));
        assert_eq!(
            decoded[1],
            Decoded::MapSize(MapSize {
                width: 10,
                height: 8
            })
        );
        assert!(matches!(&decoded[2], Decoded::Element(e) if e.unit_name == "JOB1"));
        assert!(
            matches!(&decoded[3], Decoded::Element(e) if e.unit_type == UnitType::PcJob && e.h_pixel == 400)
        );
        assert!(matches!(&decoded[4], Decoded::Arrow(a) if a.to == "JOB2"));
        assert!(matches!(&decoded[5], Decoded::StartDate(_)));
        assert!(matches!(&decoded[6], Decoded::StartTime(st) if st.relative));
        assert!(
            matches!(&decoded[7], Decoded::StartDelayTime(sy) if sy.method == TimingMethod::RelativeToSuperiorStart)
        );

        let job2 = net.sub_unit("JOB2").unwrap();
        assert_eq!(
            decode(job2.parameter("top1").unwrap()),
            Ok(Decoded::DeleteOption(1, DeleteOption::Delete))
        );
    }

    #[test]
    fn test_unknown_parameter_has_no_decoder() {
        let net = unitdef_tree::parse_one(JOBNET).unwrap();
        let sc = net.sub_unit("JOB1").unwrap().parameter("sc").unwrap();
        assert!(!has_decoder("sc"));
        assert_eq!(
            decode(sc),
            Err(DecodeError::new("sc", DecodeErrorKind::NoDecoder))
        );
    }

    #[test]
    fn test_unit_helpers() {
        let net = unitdef_tree::parse_one(JOBNET).unwrap();
        assert_eq!(decode_first::<Ty>(&net), Ok(Some(UnitType::Jobnet)));
        assert_eq!(decode_first::<Ha>(&net), Ok(None));

        let positions: Vec<_> = decode_all::<El>(&net)
            .map(|el| el.map(|el| (el.unit_name, el.h_pixel, el.v_pixel)))
            .collect::<Result<_, _>>()
            .unwrap();
        assert_eq!(
            positions,
            vec![("JOB1".to_string(), 240, 96), ("JOB2".to_string(), 400, 96)]
        );

        let job1 = net.sub_unit("JOB1").unwrap();
        assert_eq!(
            decode_first::<Eu>(job1),
            Ok(Some(ExecutionUserType::EntryUser))
        );
        assert_eq!(
            ResultJudgmentType::of(job1),
            Ok(ResultJudgmentType::DependsOnExitCode)
        );
        assert_eq!(
            ResultJudgmentType::of(net.sub_unit("JOB2").unwrap()),
            Ok(ResultJudgmentType::AlwaysNormal)
        );
    }

    #[test]
    fn test_every_registered_name_has_decoder() {
        for name in [
            "ty", "el", "sz", "sd", "st", "sy", "ey", "ar", "eu", "jd", "ha", "fd", "etm", "tho",
            "wth", "mladr", "soa", "sea", "top1", "top2", "top3", "top4", "ej", "ejc", "eji",
            "ejv", "ejt", "ejf", "ncl", "ncs", "ncex", "env",
        ] {
            assert!(has_decoder(name), "{name}");
        }
    }

    #[test]
    fn test_registry_covers_judgment_and_connector_units() {
        let unit = unitdef_tree::parse_one(
            r#"unit=JDG,,,;{ty=jdj;ej=ge;ejc=3;unit=C,,,;{ty=nc;ncl=y;ncs=y;ncex=n;env="A=1";}}"#,
        )
        .unwrap();
        let decoded = |unit: &Unit, name| decode(unit.parameter(name).unwrap());
        assert_eq!(
            decoded(&unit, "ej"),
            Ok(Decoded::JudgmentCondition(JudgmentCondition::ExitCodeGreaterOrEqual))
        );
        assert_eq!(decoded(&unit, "ejc"), Ok(Decoded::JudgmentExitCode(3)));

        let connector = unit.sub_unit("C").unwrap();
        assert_eq!(decoded(connector, "ncl"), Ok(Decoded::ConnectorOrdering(true)));
        assert_eq!(
            decoded(connector, "ncs"),
            Ok(Decoded::ConnectorSync(ConnectorSync::Synchronous))
        );
        assert_eq!(
            decoded(connector, "ncex"),
            Ok(Decoded::ConnectorAcrossEnvironments(false))
        );
        assert_eq!(
            decoded(connector, "env"),
            Ok(Decoded::Environment(vec![EnvironmentVariable {
                name: "A".into(),
                value: "1".into(),
            }]))
        );
    }

    #[test]
    fn test_decoding_is_repeatable() {
        let net = unitdef_tree::parse_one(JOBNET).unwrap();
        for parameter in net.parameters() {
            assert_eq!(decode(parameter), decode(parameter));
        }
    }
}
