//! Tuple destructuring.

mod util;

use lumen_types::{PrimitiveKind, TypeId};
use pretty_assertions::assert_eq;
use util::{Fixture, codes};

#[test]
fn too_few_values_is_a_single_arity_report() {
    let mut f = Fixture::new();
    let string = f.reg.well_known.string;

    let a = f.b.ident("a");
    let b2 = f.b.ident("b");
    let c = f.b.ident("c");
    let x = f.b.int(1);
    let y = f.b.int(2);
    let rhs = f.b.list(vec![x, y]);
    let assign = f.b.tuple_assign(vec![a, b2, c], rhs);
    let root = f.b.root(vec![assign]);
    f.set_type(a, string);
    f.set_type(b2, string);
    f.set_type(c, string);

    let diagnostics = f.run(root);
    assert_eq!(codes(&diagnostics), vec![5050]);
    assert!(diagnostics[0].message_text.contains('3'));
    assert!(diagnostics[0].message_text.contains('2'));
}

#[test]
fn elements_are_checked_pairwise() {
    let mut f = Fixture::new();
    let string = f.reg.well_known.string;

    let a = f.b.ident("a");
    let b2 = f.b.ident("b");
    let x = f.b.int(1);
    let y = f.b.int(2);
    let rhs = f.b.list(vec![x, y]);
    let assign = f.b.tuple_assign(vec![a, b2], rhs);
    let root = f.b.root(vec![assign]);
    f.set_type(a, string);
    f.set_type(b2, TypeId::INT);

    assert_eq!(codes(&f.run(root)), vec![5020]);
}

#[test]
fn surplus_values_are_allowed() {
    let mut f = Fixture::new();
    let a = f.b.ident("a");
    let x = f.b.int(1);
    let y = f.b.int(2);
    let z = f.b.int(3);
    let rhs = f.b.list(vec![x, y, z]);
    let assign = f.b.tuple_assign(vec![a], rhs);
    let root = f.b.root(vec![assign]);
    f.set_type(a, TypeId::INT);

    assert_eq!(codes(&f.run(root)), Vec::<u32>::new());
}

#[test]
fn non_literal_source_is_checked_through_element_type() {
    let mut f = Fixture::new();
    let string = f.reg.well_known.string;
    let list_class = f.reg.well_known.list_class;
    let strings = f.itn.class_type(list_class, vec![string]);

    let a = f.b.ident("a");
    let rhs = f.b.ident("names");
    let assign = f.b.tuple_assign(vec![a], rhs);
    let root = f.b.root(vec![assign]);
    f.set_type(a, TypeId::INT);
    f.set_type(rhs, strings);

    assert_eq!(codes(&f.run(root)), vec![5020]);
}

#[test]
fn spread_target_compares_its_element_type() {
    let mut f = Fixture::new();
    let list_class = f.reg.well_known.list_class;
    let integer = f.reg.boxed_type(PrimitiveKind::Int);
    let integers = f.itn.class_type(list_class, vec![integer]);

    let rest = f.b.ident("rest");
    let target = f.b.spread(rest);
    let value = f.b.string("a");
    let rhs = f.b.list(vec![value]);
    let assign = f.b.tuple_assign(vec![target], rhs);
    let root = f.b.root(vec![assign]);
    f.set_type(rest, integers);

    assert_eq!(codes(&f.run(root)), vec![5020]);
}

#[test]
fn untyped_targets_are_skipped() {
    let mut f = Fixture::new();
    let a = f.b.ident("a");
    let x = f.b.string("one");
    let rhs = f.b.list(vec![x]);
    let assign = f.b.tuple_assign(vec![a], rhs);
    let root = f.b.root(vec![assign]);

    assert_eq!(codes(&f.run(root)), Vec::<u32>::new());
}
