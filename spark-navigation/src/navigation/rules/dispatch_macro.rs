macro_rules! define_rules {
    ($($name: ident => $to: ident, )*) => {
        #[derive(Debug, Copy, Clone)]
        pub(crate) enum RuleDispatcher {
            $(
                $name($to),
            )*
        }

        impl Rule for RuleDispatcher {
            fn evaluate(&self, ctx: &FrameContext) -> Option<Instruction> {
                match self {
                    $(
                        RuleDispatcher::$name(rule) => rule.evaluate(ctx),
                    )*
                }
            }
        }

        impl Rule for Vec<RuleDispatcher> {
            fn evaluate(&self, ctx: &FrameContext) -> Option<Instruction> {
                self.iter().find_map(|rule| rule.evaluate(ctx))
            }
        }

        impl RuleDispatcher {
            pub fn all() -> Vec<Self> {
                vec![
                    $(
                        Self::$name($to),
                    )*
                ]
            }
        }
    };
}
