mod common;

use common::{compile_errors, output_lines};

#[test]
fn reading_a_local_in_its_own_initializer_is_rejected() {
    assert_eq!(
        compile_errors("var a = \"x\";\n{\n  var a = a;\n}"),
        vec!["[line 3] Error at 'a': Can't read local variable in its own initializer."]
    );
}

#[test]
fn global_self_reference_is_allowed() {
    // Globals are late bound: the initializer reads the previous global.
    assert_eq!(output_lines("var a = 1; var a = a + 1; print a;"), vec!["2"]);
}

#[test]
fn duplicate_local_declaration() {
    assert_eq!(
        compile_errors("{ var a = 1; var a = 2; }\nfun f(x, x) {}"),
        vec![
            "[line 1] Error at 'a': Already a variable with this name in this scope.",
            "[line 2] Error at 'x': Already a variable with this name in this scope.",
        ]
    );
}

#[test]
fn illegal_return_this_and_super_all_surface_together() {
    let source = "\
return 1;
print this;
print super.x;
class A { init() { return 2; } m() { super.m(); } }
fun f() { this.y = 1; }";

    assert_eq!(
        compile_errors(source),
        vec![
            "[line 1] Error at 'return': Can't return from top-level code.",
            "[line 2] Error at 'this': Can't use 'this' outside of a class.",
            "[line 3] Error at 'super': Can't use 'super' outside of a class.",
            "[line 4] Error at 'return': Can't return a value from an initializer.",
            "[line 4] Error at 'super': Can't use 'super' in a class with no superclass.",
            "[line 5] Error at 'this': Can't use 'this' outside of a class.",
        ]
    );
}

#[test]
fn bare_return_in_initializer_is_allowed() {
    let lines = output_lines(
        "class A { init() { this.v = 1; return; this.v = 2; } }\nprint A().v;",
    );
    assert_eq!(lines, vec!["1"]);
}

#[test]
fn class_cannot_inherit_from_itself() {
    assert_eq!(
        compile_errors("class Oops < Oops {}"),
        vec!["[line 1] Error at 'Oops': A class can't inherit from itself."]
    );
}

#[test]
fn closures_bind_to_the_declaration_in_scope_at_definition() {
    let source = "\
var a = \"global\";
{
  fun show() { print a; }
  show();
  var a = \"block\";
  show();
}";

    assert_eq!(output_lines(source), vec!["global", "global"]);
}

#[test]
fn resolution_errors_prevent_any_output() {
    // `compile_errors` also asserts nothing was printed.
    compile_errors("print \"before\";\n{ var b = b; }");
}
