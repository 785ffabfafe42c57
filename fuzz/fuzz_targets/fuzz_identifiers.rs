#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if let Ok(s) = std::str::from_utf8(data) {
        let cpf = consignacoes_mock::core::is_valid_cpf(s);
        let cnpj = consignacoes_mock::core::is_valid_cnpj(s);
        // Punctuation never changes the verdict.
        let cleaned = consignacoes_mock::core::clean_digits(s);
        assert_eq!(cpf, consignacoes_mock::core::is_valid_cpf(&cleaned));
        assert_eq!(cnpj, consignacoes_mock::core::is_valid_cnpj(&cleaned));
    }
});
