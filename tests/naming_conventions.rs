use rowscan::naming::{
    default_convention, DefaultConvention, FnConvention, IdentityConvention, NamingConvention,
    RenameConvention, RewriteConvention,
};

fn convert(convention: &dyn NamingConvention, name: &str) -> String {
    convention.convert(name, &IdentityConvention)
}

#[test]
fn default_camel_cases_underscored_names() {
    assert_eq!(convert(&DefaultConvention, "first_name"), "FirstName");
    assert_eq!(convert(&DefaultConvention, "user_id"), "UserID");
    assert_eq!(convert(&DefaultConvention, "id"), "ID");
    assert_eq!(convert(&DefaultConvention, "a_b_c"), "ABC");
    // consecutive and surrounding delimiters collapse
    assert_eq!(convert(&DefaultConvention, "__created__at_"), "CreatedAt");
}

#[test]
fn default_leaves_names_without_underscores_alone_apart_from_id_suffix() {
    assert_eq!(convert(&DefaultConvention, "Name"), "Name");
    assert_eq!(convert(&DefaultConvention, "UserId"), "UserID");
    assert_eq!(convert(&DefaultConvention, "userName"), "UserName");
    // only a literal trailing "Id" is normalised
    assert_eq!(convert(&DefaultConvention, "IdCard"), "IdCard");
    assert_eq!(convert(&DefaultConvention, "already_caps_ID"), "AlreadyCapsID");
    assert_eq!(convert(&DefaultConvention, "paid"), "Paid");
}

#[test]
fn identity_returns_input() {
    for name in ["first_name", "ID", "", "x_y_id"] {
        assert_eq!(convert(&IdentityConvention, name), name);
    }
}

#[test]
fn shared_default_behaves_like_default() {
    let shared = default_convention();
    assert_eq!(convert(shared.as_ref(), "order_id"), "OrderID");
}

#[test]
fn closure_convention_may_delegate_to_next() {
    let upper_or_next = FnConvention(|name: &str, next: &dyn NamingConvention| {
        if name == "pk" {
            "ID".to_string()
        } else {
            next.convert(name, &IdentityConvention)
        }
    });
    let chained = upper_or_next.then(DefaultConvention);
    assert_eq!(convert(&chained, "pk"), "ID");
    assert_eq!(convert(&chained, "first_name"), "FirstName");
}

#[test]
fn built_in_conventions_ignore_their_successor() {
    let chained = DefaultConvention.then(FnConvention(|_: &str, _: &dyn NamingConvention| {
        "never".to_string()
    }));
    assert_eq!(convert(&chained, "user_id"), "UserID");
}

#[test]
fn renames_take_precedence_and_fall_through() {
    let renames = RenameConvention::new().rename("usr_nm", "UserName");
    assert_eq!(renames.len(), 1);
    let convention = renames.then(DefaultConvention);
    assert_eq!(convert(&convention, "usr_nm"), "UserName");
    assert_eq!(convert(&convention, "last_name"), "LastName");
    // at the end of a chain the terminal identity is the fallback
    let alone: RenameConvention = [("a", "B")].into_iter().collect();
    assert_eq!(convert(&alone, "first_name"), "first_name");
}

#[test]
fn rewrites_apply_in_order_before_next() {
    let rewrites = RewriteConvention::new()
        .rule("^tbl_", "")
        .unwrap()
        .rule("_no$", "_number")
        .unwrap();
    let convention = rewrites.then(DefaultConvention);
    assert_eq!(convert(&convention, "tbl_customer_id"), "CustomerID");
    assert_eq!(convert(&convention, "tbl_phone_no"), "PhoneNumber");
}

#[test]
fn invalid_rewrite_pattern_is_a_config_error() {
    let err = RewriteConvention::new().rule("(unclosed", "").unwrap_err();
    assert!(matches!(err, rowscan::ScanError::Config(_)));
}
