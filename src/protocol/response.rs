//! Validation and decoding of responses from the machine.

use serde::Serialize;

use crate::jura::JuraError;

/// Offset and width of the espresso-cup counter in a status payload.
pub const ESPRESSO_COUNTER_FIELD: (usize, usize) = (0, 4);
/// Offset and width of the coffee-cup counter in a status payload.
pub const COFFEE_COUNTER_FIELD: (usize, usize) = (8, 4);

/// Checks that `response` carries the expected acknowledgement prefix and
/// returns the payload after it. Anything else, including bridge error
/// strings like `err:...`, is rejected whole.
pub fn expect_ack<'a>(response: &'a str, expected: &str) -> Result<&'a str, JuraError> {
    response
        .strip_prefix(expected)
        .ok_or_else(|| JuraError::InvalidResponse {
            actual: response.to_owned(),
            expected: expected.to_owned(),
        })
}

/// Extracts one fixed-width base-16 counter from a status payload.
pub fn counter_field(payload: &str, offset: usize, len: usize) -> Result<u32, JuraError> {
    let bad_field = || JuraError::Parse {
        payload: payload.to_owned(),
        offset,
        len,
    };
    let field = payload.get(offset..offset + len).ok_or_else(bad_field)?;
    u32::from_str_radix(field, 16).map_err(|_| bad_field())
}

/// The cup counters carried by one status payload.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CupCounters {
    pub cups_espresso: u32,
    pub cups_coffee: u32,
}

impl CupCounters {
    /// Decodes both counters from the payload of an acknowledged status
    /// response. The payload may carry further fields after the coffee
    /// counter; they are ignored.
    pub fn parse(payload: &str) -> Result<CupCounters, JuraError> {
        let (offset, len) = ESPRESSO_COUNTER_FIELD;
        let cups_espresso = counter_field(payload, offset, len)?;
        let (offset, len) = COFFEE_COUNTER_FIELD;
        let cups_coffee = counter_field(payload, offset, len)?;
        Ok(CupCounters {
            cups_espresso,
            cups_coffee,
        })
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use rstest::*;

    #[rstest]
    #[case("000500000003", 5, 3)]
    #[case("000000000000", 0, 0)]
    #[case("ffff0000ffff", 0xffff, 0xffff)]
    #[case("01a2004c02b70054", 0x01a2, 0x02b7)]
    #[case("ABCD0000EF01", 0xabcd, 0xef01)]
    fn counters_decode(#[case] payload: &str, #[case] espresso: u32, #[case] coffee: u32) {
        let counters = CupCounters::parse(payload).expect("payload should decode");
        assert_eq!(counters.cups_espresso, espresso);
        assert_eq!(counters.cups_coffee, coffee);
    }

    #[rstest]
    #[case("zzzz00000003", 0, 4)]
    #[case("0005zzzz0003", 4, 4)]
    #[case("000500000003", 10, 4)]
    fn non_hex_or_short_fields_are_parse_errors(
        #[case] payload: &str,
        #[case] offset: usize,
        #[case] len: usize,
    ) {
        let error = counter_field(payload, offset, len).expect_err("field should be rejected");
        match error {
            JuraError::Parse {
                payload: in_error, ..
            } => assert_eq!(in_error, payload),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[rstest]
    #[case("zzzz00000003")]
    #[case("0005000000zz")]
    #[case("00050000")]
    #[case("")]
    fn bad_payloads_are_rejected_whole(#[case] payload: &str) {
        assert!(matches!(
            CupCounters::parse(payload),
            Err(JuraError::Parse { .. })
        ));
    }

    #[test]
    fn ack_prefix_is_stripped() {
        assert_eq!(
            expect_ack("rt:000500000003", "rt:").expect("valid ack"),
            "000500000003"
        );
        // An empty remainder is still a success.
        assert_eq!(expect_ack("ok:", "ok:").expect("valid ack"), "");
    }

    #[test]
    fn ack_mismatch_names_both_sides() {
        let error = expect_ack("err:bad", "rt:").expect_err("mismatch should be rejected");
        match &error {
            JuraError::InvalidResponse { actual, expected } => {
                assert_eq!(actual, "err:bad");
                assert_eq!(expected, "rt:");
            }
            other => panic!("unexpected error: {:?}", other),
        }
        let message = error.to_string();
        assert!(message.contains("err:bad"));
        assert!(message.contains("rt:"));
    }
}
