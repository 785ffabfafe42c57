#![no_main]

use chrono::NaiveDate;
use consignacoes_mock::core::*;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(s) = std::str::from_utf8(data) else {
        return;
    };
    let mut parts = s.splitn(3, '&');
    let params = InquiryParams::new(
        parts.next().unwrap_or_default(),
        parts.next().unwrap_or_default(),
        parts.next().unwrap_or_default(),
    );
    let today = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
    // Must never panic, whatever the parameters.
    let _ = validate_inquiry(&params, today);
    if let Ok(c) = Competency::parse(s) {
        let _ = c.plus_months(i64::from(data.len() as u32));
    }
});
