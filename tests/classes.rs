mod common;

use common::{output_lines, runtime_error};

#[test]
fn fields_are_created_on_assignment() {
    let source = "\
class Point {}
var p = Point();
p.x = 1;
p.y = p.x + 2;
print p.y;
print p;
print Point;";

    assert_eq!(output_lines(source), vec!["3", "Point instance", "Point"]);
}

#[test]
fn methods_bind_this_to_the_receiver() {
    let source = "\
class Counter {
  init() { this.n = 0; }
  bump() { this.n = this.n + 1; return this; }
}
var c = Counter();
c.bump().bump();
print c.n;
var bump = c.bump;
bump();
print c.n;
print bump;";

    assert_eq!(output_lines(source), vec!["2", "3", "<fn bump>"]);
}

#[test]
fn initializer_returns_the_instance() {
    let source = "\
class Box { init(v) { this.v = v; } }
var b = Box(7);
print b.init(9) == b;
print b.v;";

    assert_eq!(output_lines(source), vec!["true", "9"]);
}

#[test]
fn constructor_arity_follows_init() {
    let (_, message, _) = runtime_error("class P { init(a, b) {} }\nP(1);");
    assert_eq!(message, "Expected 2 arguments but got 1.");

    let (_, message, _) = runtime_error("class Empty {}\nEmpty(1);");
    assert_eq!(message, "Expected 0 arguments but got 1.");
}

#[test]
fn inherited_methods_see_the_subclass_instance() {
    let source = "\
class A {
  greet() { print \"A says \" + this.name; }
}
class B < A {
  init(name) { this.name = name; }
}
B(\"bee\").greet();";

    assert_eq!(output_lines(source), vec!["A says bee"]);
}

#[test]
fn super_calls_dispatch_to_the_superclass_method() {
    let source = "\
class A { greet() { return \"A\"; } }
class B < A { greet() { return \"B then \" + super.greet(); } }
class C < B { greet() { return \"C then \" + super.greet(); } }
print C().greet();";

    assert_eq!(output_lines(source), vec!["C then B then A"]);
}

#[test]
fn super_is_bound_statically_to_the_defining_class() {
    let source = "\
class A { method() { print \"A method\"; } }
class B < A {
  method() { print \"B method\"; }
  test() { super.method(); }
}
class C < B {}
C().test();";

    assert_eq!(output_lines(source), vec!["A method"]);
}

#[test]
fn initializers_are_inherited() {
    let source = "\
class Base { init(x) { this.x = x; } }
class Derived < Base {}
print Derived(4).x;";

    assert_eq!(output_lines(source), vec!["4"]);

    let (_, message, _) = runtime_error("class Base { init(x) {} }\nclass D < Base {}\nD();");
    assert_eq!(message, "Expected 1 arguments but got 0.");
}

#[test]
fn fields_shadow_methods() {
    let source = "\
class A { m() { return \"method\"; } }
var a = A();
fun replacement() { return \"field\"; }
a.m = replacement;
print a.m();";

    assert_eq!(output_lines(source), vec!["field"]);
}

#[test]
fn property_access_on_non_instances() {
    let (_, message, line) = runtime_error("var s = \"str\";\nprint s.length;");
    assert_eq!((message.as_str(), line), ("Only instances have properties.", 2));

    let (_, message, _) = runtime_error("var n = 1; n.field = 2;");
    assert_eq!(message, "Only instances have fields.");

    let (_, message, _) = runtime_error("class A {} A.x;");
    assert_eq!(message, "Only instances have properties.");
}

#[test]
fn missing_properties_are_runtime_errors() {
    let (_, message, _) = runtime_error("class A {}\nA().nope;");
    assert_eq!(message, "Undefined property 'nope'.");

    let (_, message, line) =
        runtime_error("class A {}\nclass B < A { m() { return super.gone(); } }\nB().m();");
    assert_eq!(message, "Undefined property 'gone'.");
    assert_eq!(line, 2);
}

#[test]
fn superclass_must_be_a_class() {
    let (output, message, line) =
        runtime_error("print \"first\";\nvar NotAClass = \"text\";\nclass Sub < NotAClass {}");

    assert_eq!(output, "first\n");
    assert_eq!(message, "Superclass must be a class.");
    assert_eq!(line, 3);
}

#[test]
fn instances_have_identity_equality() {
    let source = "\
class A {}
var a = A();
var b = A();
print a == a;
print a == b;
print A == A;";

    assert_eq!(output_lines(source), vec!["true", "false", "true"]);
}
