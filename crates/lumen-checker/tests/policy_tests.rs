//! Severity policy and pass behavior.

mod util;

use lumen_checker::CancelFlag;
use lumen_common::DiagnosticCategory;
use pretty_assertions::assert_eq;
use util::{Fixture, codes};

#[test]
fn errors_downgrade_to_warnings_in_dynamic_code() {
    let mut f = Fixture::new();
    let string = f.reg.well_known.string;

    let init = f.b.int(42);
    let decl = f.b.var_decl("name", Some(string), init);
    let root = f.b.root(vec![decl]);

    let diagnostics = f.run(root);
    assert_eq!(codes(&diagnostics), vec![5020]);
    assert_eq!(diagnostics[0].category, DiagnosticCategory::Warning);
}

#[test]
fn static_region_suppresses_errors_while_strict_checker_runs() {
    let mut f = Fixture::new();
    let string = f.reg.well_known.string;

    let init = f.b.int(42);
    let decl = f.b.var_decl("name", Some(string), init);
    let func = f.b.fn_decl("typedZone", vec![], None, vec![], vec![decl], true);
    let root = f.b.root(vec![func]);

    assert_eq!(codes(&f.run(root)), Vec::<u32>::new());
}

#[test]
fn static_region_keeps_errors_when_strict_checker_is_off() {
    let mut f = Fixture::new();
    f.options.strict_checker_active = false;
    let string = f.reg.well_known.string;

    let init = f.b.int(42);
    let decl = f.b.var_decl("name", Some(string), init);
    let func = f.b.fn_decl("typedZone", vec![], None, vec![], vec![decl], true);
    let root = f.b.root(vec![func]);

    let diagnostics = f.run(root);
    assert_eq!(codes(&diagnostics), vec![5020]);
    assert_eq!(diagnostics[0].category, DiagnosticCategory::Error);
}

#[test]
fn warnings_survive_static_regions() {
    let mut f = Fixture::new();
    let (_, color_ty) = f.enum_class("Color", &["RED"]);
    let string = f.reg.well_known.string;

    let init = f.b.ident("chosen");
    let decl = f.b.var_decl("c", Some(color_ty), init);
    let func = f.b.fn_decl("typedZone", vec![], None, vec![], vec![decl], true);
    let root = f.b.root(vec![func]);
    f.set_type(init, string);

    let diagnostics = f.run(root);
    assert_eq!(codes(&diagnostics), vec![5061]);
    assert_eq!(diagnostics[0].category, DiagnosticCategory::Warning);
}

#[test]
fn code_outside_the_region_is_still_dynamic() {
    let mut f = Fixture::new();
    let string = f.reg.well_known.string;

    let inner_init = f.b.int(1);
    let inner = f.b.var_decl("a", Some(string), inner_init);
    let func = f.b.fn_decl("typedZone", vec![], None, vec![], vec![inner], true);
    let outer_init = f.b.int(2);
    let outer = f.b.var_decl("b", Some(string), outer_init);
    let root = f.b.root(vec![func, outer]);

    let diagnostics = f.run(root);
    assert_eq!(codes(&diagnostics), vec![5020]);
    assert_eq!(diagnostics[0].category, DiagnosticCategory::Warning);
}

#[test]
fn repeated_passes_emit_identical_diagnostics() {
    let mut f = Fixture::new();
    let string = f.reg.well_known.string;

    let init = f.b.int(42);
    let decl = f.b.var_decl("name", Some(string), init);
    let bad_cast_expr = f.b.string("origin");
    let (_, point_ty) = f.class("Point");
    let cast = f.b.cast(point_ty, bad_cast_expr);
    let root = f.b.root(vec![decl, cast]);

    let first = f.run(root);
    let second = f.run(root);
    assert_eq!(first, second);
    assert_eq!(codes(&first), vec![5020, 5020]);
}

#[test]
fn cancelled_pass_emits_nothing() {
    let mut f = Fixture::new();
    let string = f.reg.well_known.string;

    let init = f.b.int(42);
    let decl = f.b.var_decl("name", Some(string), init);
    let root = f.b.root(vec![decl]);

    let cancel = CancelFlag::new();
    cancel.cancel();
    f.cancel = Some(cancel);

    assert_eq!(codes(&f.run(root)), Vec::<u32>::new());
}
