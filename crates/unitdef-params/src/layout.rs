//! Map layout parameters: element positions (`el`) and map size (`sz`).

use unitdef_tree::Parameter;

use crate::unit_type::UnitType;
use crate::values::{Values, numeral};
use crate::{DecodeError, Decoder};

/// Decoded `el=name,type,+h +v`: where a sub-unit sits on its jobnet's map.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Element {
    pub unit_name: String,
    pub unit_type: UnitType,
    pub h_pixel: u32,
    pub v_pixel: u32,
}

/// Decoded `sz=<width>x<height>`, in map cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MapSize {
    pub width: u32,
    pub height: u32,
}

/// Decoder for `el`.
pub struct El;

impl Decoder for El {
    const NAME: &'static str = "el";
    type Output = Element;

    fn decode_values(parameter: &Parameter) -> Result<Element, DecodeError> {
        let values = Values::new(parameter);
        values.exactly(3, "three values")?;

        let unit_name = values.text(0)?.to_string();
        let code = values.text(1)?;
        let unit_type = UnitType::from_code(code).ok_or_else(|| values.unknown_code(code))?;

        let position = values.text(2)?;
        let (h_pixel, v_pixel) =
            pixels(position).ok_or_else(|| values.pattern("+<h> +<v>", position))?;

        Ok(Element {
            unit_name,
            unit_type,
            h_pixel,
            v_pixel,
        })
    }
}

/// Match `+<digits>\s*+<digits>`.
fn pixels(text: &str) -> Option<(u32, u32)> {
    let rest = text.strip_prefix('+')?;
    let (h, v) = rest.split_once('+')?;
    Some((numeral(h.trim_end())?, numeral(v)?))
}

/// Decoder for `sz`.
pub struct Sz;

impl Decoder for Sz {
    const NAME: &'static str = "sz";
    type Output = MapSize;

    fn decode_values(parameter: &Parameter) -> Result<MapSize, DecodeError> {
        let values = Values::new(parameter);
        let text = values.single()?;
        let (width, height) =
            dimensions(text).ok_or_else(|| values.pattern("<width>x<height>", text))?;
        Ok(MapSize { width, height })
    }
}

/// Match `<digits><non-digits><digits>`.
fn dimensions(text: &str) -> Option<(u32, u32)> {
    let split = text.find(|c: char| !c.is_ascii_digit())?;
    let (width, rest) = text.split_at(split);
    let height = rest.trim_start_matches(|c: char| !c.is_ascii_digit());
    Some((numeral(width)?, numeral(height)?))
}

#[cfg(test)]
mod tests {
    use unitdef_tree::ParameterBuilder;

    use super::*;
    use crate::DecodeErrorKind;

    fn param(name: &str, values: &[&str]) -> Parameter {
        values
            .iter()
            .fold(ParameterBuilder::new(name), |b, v| b.token(*v))
            .build()
            .unwrap()
    }

    #[test]
    fn test_element() {
        let el = El::decode(&param("el", &["JOB1", "j", "+240 +96"])).unwrap();
        assert_eq!(
            el,
            Element {
                unit_name: "JOB1".into(),
                unit_type: UnitType::UnixJob,
                h_pixel: 240,
                v_pixel: 96,
            }
        );
    }

    #[test]
    fn test_element_position_spacing() {
        let el = El::decode(&param("el", &["N", "n", "+0+16"])).unwrap();
        assert_eq!((el.h_pixel, el.v_pixel), (0, 16));
        let el = El::decode(&param("el", &["N", "n", "+1   +2"])).unwrap();
        assert_eq!((el.h_pixel, el.v_pixel), (1, 2));
    }

    #[test]
    fn test_element_errors() {
        let err = El::decode(&param("el", &["JOB1", "j", "240 96"])).unwrap_err();
        assert_eq!(
            err.kind,
            DecodeErrorKind::Pattern {
                expected: "+<h> +<v>",
                found: "240 96".into()
            }
        );
        let err = El::decode(&param("el", &["JOB1", "zz", "+1 +1"])).unwrap_err();
        assert_eq!(err.kind, DecodeErrorKind::UnknownCode("zz".into()));
        let err = El::decode(&param("el", &["JOB1", "j"])).unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::Arity { found: 2, .. }));
        let err = El::decode(&param("el", &["JOB1", "j", "+1 +-1"])).unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::Pattern { .. }));
    }

    #[test]
    fn test_map_size() {
        let sz = Sz::decode(&param("sz", &["50x30"])).unwrap();
        assert_eq!(
            sz,
            MapSize {
                width: 50,
                height: 30
            }
        );
        let sz = Sz::decode(&param("sz", &["5 by 3"])).unwrap();
        assert_eq!((sz.width, sz.height), (5, 3));
    }

    #[test]
    fn test_map_size_errors() {
        for bad in ["50", "x30", "50x", "50x30x2"] {
            let err = Sz::decode(&param("sz", &[bad])).unwrap_err();
            assert!(
                matches!(err.kind, DecodeErrorKind::Pattern { .. }),
                "{bad}: {err}"
            );
        }
        let err = Sz::decode(&param("sz", &["1", "2"])).unwrap_err();
        assert!(matches!(err.kind, DecodeErrorKind::Arity { found: 2, .. }));
    }

    #[test]
    fn test_quoted_value_is_read_as_text() {
        let parameter = ParameterBuilder::new("sz").quoted("8x4").build().unwrap();
        assert_eq!(Sz::decode(&parameter).unwrap().height, 4);
    }
}
