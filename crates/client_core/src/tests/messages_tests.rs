use super::*;

#[test]
fn first_flagged_field_wins_in_catalog_order() {
    let body = ErrorBody::new("Validation failed")
        .with_field("email", "must be a well-formed email address")
        .with_field("cpf", "size must be 11");
    assert_eq!(CUSTOMER.translate(&body), "O cpf deve ter exatamente 11 dígitos");
}

#[test]
fn user_conflicts_map_to_portuguese() {
    assert_eq!(
        USER.translate(&ErrorBody::new("A user with this username already exists.")),
        "Já existe um usuário com esse username"
    );
    assert_eq!(
        USER.translate(&ErrorBody::new("A user with this email already exists.")),
        "Já existe um usuário com esse email"
    );
}

#[test]
fn unknown_conflict_falls_back_to_generic_text() {
    assert_eq!(
        USER.translate(&ErrorBody::new("Something nobody expected")),
        GENERIC_ERROR
    );
    assert_eq!(CUSTOMER.translate(&ErrorBody::default()), GENERIC_ERROR);
}

#[test]
fn relaying_catalogs_prefer_server_message() {
    assert_eq!(
        MACHINE_CREATE.translate(&ErrorBody::new("Customer not found")),
        "Customer not found"
    );
    assert_eq!(
        MACHINE_CREATE.translate(&ErrorBody::default()),
        "Erro ao criar máquina. Verifique os dados."
    );
}

#[test]
fn reject_keeps_unauthorized_out_of_inline_errors() {
    assert_eq!(CUSTOMER.reject(ClientError::Unauthorized), ActionError::Unauthorized);
}

#[test]
fn login_errors_distinguish_bad_credentials() {
    assert_eq!(login_error("Invalid credentials"), LOGIN_INVALID);
    assert_eq!(login_error("Locked"), LOGIN_UNEXPECTED);
}
