//! Common source code fixtures for tests.

// Outlining
pub const NAMESPACE_REGION_CLASS_METHOD_IF: &str = r#"namespace N
{
    #region R
    class C
    {
        void M()
        {
            if (true)
            {
            }
        }
    }
    #endregion
}
"#;

pub const USINGS_AND_CLASS: &str = r#"using System;
using System.Text;

class Widget
{
    int count;
}
"#;

pub const LOOPS: &str = r#"class C
{
    void Run()
    {
        while (running)
        {
            step();
        }
        for (int i = 0; i < 3; i++)
        {
            tick(i);
        }
    }
}
"#;

// Classification
pub const DOCUMENTED_CLASS: &str = r#"/// <summary>Widget docs</summary>
class Widget
{
    // counter
    int count = 42;
    string Name { get; set; }
}
"#;

pub const DUPLICATE_NAMES: &str = r#"namespace Shapes
{
    class Shape { }
    class Circle : Shape
    {
        Shape Outline() => new Shape();
    }
}
"#;

// Todo comments
pub const TODO_LINE_COMMENTS: &str = r#"class C
{
    // TODONOT do this
    // TODO: do this
    // todo fix
    int x; // HACK keep
}
"#;

pub const TODO_BLOCK_COMMENT: &str = "/* TODO a\n   line2\n   TODO b */\nclass C {}\n";

pub const TODO_AFTER_DIRECTIVES: &str = "#if DEBUG // TODO remove\nclass C {}\n#endif // TODO later\n";
