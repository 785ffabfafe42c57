use consignacoes_mock::core::*;

fn main() {
    println!("=== CPF ===");
    for cpf in ["123.456.789-09", "123.456.789-08", "111.111.111-11"] {
        println!("  {cpf:<20} valid={}", is_valid_cpf(cpf));
    }

    println!("\n=== CNPJ ===");
    for cnpj in ["14.772.711/0001-99", "14.772.711/0001-98", "14772711", "00000000000000"] {
        println!("  {cnpj:<20} valid={}", is_valid_cnpj(cnpj));
    }

    println!("\n=== Check digits ===");
    if let Some((a, b)) = cnpj_check_digits("112223330001") {
        println!("  CNPJ 11.222.333/0001-{a}{b}");
    }

    println!("\n=== Competency arithmetic ===");
    match Competency::parse("202411") {
        Ok(c) => {
            for offset in [1, 2, 3, 14] {
                if let Some(end) = c.plus_months(offset) {
                    println!("  {c} + {offset:>2} months = {end}");
                }
            }
        }
        Err(e) => println!("  {e}"),
    }
    if let Err(e) = Competency::parse("202513") {
        println!("  202513 rejected: {e}");
    }
}
