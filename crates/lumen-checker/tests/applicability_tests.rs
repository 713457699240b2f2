//! Candidate filtering against argument lists.

mod util;

use lumen_resolve::{Candidate, ResolveOutcome};
use lumen_types::{ClosureParam, TypeId};
use pretty_assertions::assert_eq;
use util::{Fixture, codes};

#[test]
fn matching_method_call_is_silent() {
    let mut f = Fixture::new();
    let (owner, _) = f.class("Greeter");
    let string = f.reg.well_known.string;
    let greet = f.method(owner, "greet", &[string], TypeId::VOID);

    let callee = f.b.ident("greet");
    let arg = f.b.string("hi");
    let call = f.b.call(callee, vec![arg]);
    let root = f.b.root(vec![call]);
    f.resolver
        .set_call(call, ResolveOutcome::best(Candidate::direct(greet)));

    assert_eq!(codes(&f.run(root)), Vec::<u32>::new());
}

#[test]
fn inapplicable_method_call_is_reported() {
    let mut f = Fixture::new();
    let (owner, _) = f.class("Greeter");
    let string = f.reg.well_known.string;
    let greet = f.method(owner, "greet", &[string], TypeId::VOID);

    let callee = f.b.ident("greet");
    let arg = f.b.int(42);
    let call = f.b.call(callee, vec![arg]);
    let root = f.b.root(vec![call]);
    f.resolver
        .set_call(call, ResolveOutcome::best(Candidate::direct(greet)));

    let diagnostics = f.run(root);
    assert_eq!(codes(&diagnostics), vec![5001]);
    assert!(diagnostics[0].message_text.contains("greet"));
    assert!(diagnostics[0].message_text.contains("int"));
}

#[test]
fn untyped_argument_keeps_candidate_conditionally_applicable() {
    let mut f = Fixture::new();
    let (owner, _) = f.class("Greeter");
    let string = f.reg.well_known.string;
    let greet = f.method(owner, "greet", &[string], TypeId::VOID);

    let callee = f.b.ident("greet");
    let arg = f.b.ident("whatever");
    let call = f.b.call(callee, vec![arg]);
    let root = f.b.root(vec![call]);
    f.resolver
        .set_call(call, ResolveOutcome::best(Candidate::direct(greet)));

    assert_eq!(codes(&f.run(root)), Vec::<u32>::new());
}

#[test]
fn arity_mismatch_is_inapplicable() {
    let mut f = Fixture::new();
    let (owner, _) = f.class("Greeter");
    let string = f.reg.well_known.string;
    let greet = f.method(owner, "greet", &[string], TypeId::VOID);

    let callee = f.b.ident("greet");
    let a = f.b.string("hi");
    let b2 = f.b.string("there");
    let call = f.b.call(callee, vec![a, b2]);
    let root = f.b.root(vec![call]);
    f.resolver
        .set_call(call, ResolveOutcome::best(Candidate::direct(greet)));

    assert_eq!(codes(&f.run(root)), vec![5001]);
}

#[test]
fn vararg_method_accepts_surplus_elements() {
    let mut f = Fixture::new();
    let (owner, _) = f.class("Calc");
    let ints = f.itn.array(TypeId::INT);
    let sum = f.varargs_method(owner, "sum", &[ints], TypeId::INT);

    let callee = f.b.ident("sum");
    let a = f.b.int(1);
    let b2 = f.b.int(2);
    let c = f.b.int(3);
    let call = f.b.call(callee, vec![a, b2, c]);
    let root = f.b.root(vec![call]);
    f.resolver
        .set_call(call, ResolveOutcome::best(Candidate::direct(sum)));

    assert_eq!(codes(&f.run(root)), Vec::<u32>::new());
}

#[test]
fn vararg_method_accepts_whole_array_at_exact_arity() {
    let mut f = Fixture::new();
    let (owner, _) = f.class("Calc");
    let ints = f.itn.array(TypeId::INT);
    let sum = f.varargs_method(owner, "sum", &[ints], TypeId::INT);

    let callee = f.b.ident("sum");
    let xs = f.b.ident("xs");
    let call = f.b.call(callee, vec![xs]);
    let root = f.b.root(vec![call]);
    f.set_type(xs, ints);
    f.resolver
        .set_call(call, ResolveOutcome::best(Candidate::direct(sum)));

    assert_eq!(codes(&f.run(root)), Vec::<u32>::new());
}

#[test]
fn vararg_method_rejects_wrong_element_type() {
    let mut f = Fixture::new();
    let (owner, _) = f.class("Calc");
    let ints = f.itn.array(TypeId::INT);
    let sum = f.varargs_method(owner, "sum", &[ints], TypeId::INT);

    let callee = f.b.ident("sum");
    let a = f.b.int(1);
    let s = f.b.string("two");
    let call = f.b.call(callee, vec![a, s]);
    let root = f.b.root(vec![call]);
    f.resolver
        .set_call(call, ResolveOutcome::best(Candidate::direct(sum)));

    assert_eq!(codes(&f.run(root)), vec![5001]);
}

#[test]
fn spread_argument_reports_unknown_arguments() {
    let mut f = Fixture::new();
    let (owner, _) = f.class("Greeter");
    let string = f.reg.well_known.string;
    let greet = f.method(owner, "greet", &[string], TypeId::VOID);

    let callee = f.b.ident("greet");
    let xs = f.b.ident("xs");
    let spread = f.b.spread(xs);
    let call = f.b.call(callee, vec![spread]);
    let root = f.b.root(vec![call]);
    f.resolver
        .set_call(call, ResolveOutcome::best(Candidate::direct(greet)));

    assert_eq!(codes(&f.run(root)), vec![5030]);
}

#[test]
fn property_syntax_mismatch_uses_closure_message() {
    let mut f = Fixture::new();
    let (owner, _) = f.class("Handlers");
    let string = f.reg.well_known.string;
    let on_event = f.method(owner, "onEvent", &[string], TypeId::VOID);

    let callee = f.b.ident("onEvent");
    let arg = f.b.int(7);
    let call = f.b.call(callee, vec![arg]);
    let root = f.b.root(vec![call]);
    let candidate = Candidate {
        via_property_syntax: true,
        ..Candidate::direct(on_event)
    };
    f.resolver.set_call(call, ResolveOutcome::best(candidate));

    let diagnostics = f.run(root);
    assert_eq!(codes(&diagnostics), vec![5002]);
    assert!(diagnostics[0].message_text.contains("Closure"));
}

#[test]
fn closure_typed_field_is_checked_structurally() {
    let mut f = Fixture::new();
    let (owner, _) = f.class("Handlers");
    let handler_ty = f.itn.closure(
        vec![ClosureParam {
            ty: TypeId::INT,
            optional: false,
        }],
        TypeId::VOID,
    );
    let handler = f.field(owner, "handler", handler_ty);

    let callee = f.b.ident("handler");
    let arg = f.b.string("oops");
    let call = f.b.call(callee, vec![arg]);
    let root = f.b.root(vec![call]);
    f.resolver
        .set_call(call, ResolveOutcome::best(Candidate::direct(handler)));

    assert_eq!(codes(&f.run(root)), vec![5001]);
}

#[test]
fn closure_variable_invocation_checks_signature() {
    let mut f = Fixture::new();
    let closure_ty = f.itn.closure(
        vec![ClosureParam {
            ty: TypeId::INT,
            optional: false,
        }],
        TypeId::VOID,
    );

    let callee = f.b.ident("handler");
    let arg = f.b.string("oops");
    let call = f.b.call(callee, vec![arg]);
    let root = f.b.root(vec![call]);
    f.set_type(callee, closure_ty);

    assert_eq!(codes(&f.run(root)), vec![5002]);
}

#[test]
fn closure_optional_parameter_may_be_omitted() {
    let mut f = Fixture::new();
    let closure_ty = f.itn.closure(
        vec![
            ClosureParam {
                ty: TypeId::INT,
                optional: false,
            },
            ClosureParam {
                ty: TypeId::INT,
                optional: true,
            },
        ],
        TypeId::VOID,
    );

    let callee = f.b.ident("step");
    let arg = f.b.int(1);
    let call = f.b.call(callee, vec![arg]);
    let root = f.b.root(vec![call]);
    f.set_type(callee, closure_ty);

    assert_eq!(codes(&f.run(root)), Vec::<u32>::new());
}

#[test]
fn closure_class_callee_goes_through_call_stub() {
    let mut f = Fixture::new();
    let closure_object = f.reg.well_known.closure_object;
    let closure_class = f.reg.well_known.closure_class;
    let call_stub = f.method(closure_class, "call", &[TypeId::INT], TypeId::VOID);

    let callee = f.b.ident("block");
    let arg = f.b.string("oops");
    let call = f.b.call(callee, vec![arg]);
    let root = f.b.root(vec![call]);
    f.set_type(callee, closure_object);
    f.resolver
        .set_member(closure_object, "call", vec![Candidate::direct(call_stub)]);

    assert_eq!(codes(&f.run(root)), vec![5002]);
}
