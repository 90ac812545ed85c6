//! Comprehensions.
//!
//! Every generator clause becomes a nested loop, filters become a
//! guarding `if`. List and dict comprehensions run synchronously in an
//! immediately invoked closure that returns the accumulator. Generator
//! expressions start a goroutine feeding an unbuffered channel and
//! return the channel at once; a consumer that stops early leaves the
//! producer blocked.
use crate::syntax::ast::*;
use crate::target::code::Code;
use crate::target::go;
use crate::translate::error::TranslateError;
use crate::translate::translator::Translator;

/// Produces the innermost loop body
type Innermost<'a, 's> = dyn FnMut(&mut Translator<'s>) -> Result<Vec<Code>, TranslateError> + 'a;

impl<'s> Translator<'s> {
    pub fn list_comp(&mut self, elt: &Expr, generators: &[Comprehension]) -> Result<Code, TranslateError> {
        let acc = self.fresh("lc");
        let list = self.runtime("List");
        let loops = self.scoped(|t| {
            t.comprehension_loops(generators, &mut |t: &mut Translator<'s>| {
                let value = t.expr(elt)?;
                Ok(vec![go::assign(
                    vec![go::id(&acc)],
                    vec![go::call(go::id("append"), vec![go::id(&acc), value])],
                )])
            })
        })?;

        let mut body = vec![go::var_decl(vec![acc.clone()], Some(list.clone()), vec![])];
        body.extend(loops);
        body.push(go::ret(vec![go::id(&acc)]));
        Ok(go::iife(vec![list], body))
    }

    pub fn dict_comp(
        &mut self,
        key: &Expr,
        value: &Expr,
        generators: &[Comprehension],
    ) -> Result<Code, TranslateError> {
        let acc = self.fresh("mm");
        let dict = self.runtime("Dict");
        let loops = self.scoped(|t| {
            t.comprehension_loops(generators, &mut |t: &mut Translator<'s>| {
                let k = t.expr(key)?;
                let v = t.expr(value)?;
                Ok(vec![go::assign(vec![go::index(go::id(&acc), k)], vec![v])])
            })
        })?;

        let mut body = vec![go::define(
            vec![go::id(&acc)],
            vec![go::composite(dict.clone(), vec![])],
        )];
        body.extend(loops);
        body.push(go::ret(vec![go::id(&acc)]));
        Ok(go::iife(vec![dict], body))
    }

    pub fn generator_exp(&mut self, elt: &Expr, generators: &[Comprehension]) -> Result<Code, TranslateError> {
        let ch = self.fresh("c");
        let chan = go::chan_of(self.runtime("Any"));
        let mut producer = self.scoped(|t| {
            t.comprehension_loops(generators, &mut |t: &mut Translator<'s>| {
                let value = t.expr(elt)?;
                Ok(vec![go::send(go::id(&ch), value)])
            })
        })?;
        producer.push(go::call(go::id("close"), vec![go::id(&ch)]));

        Ok(go::iife(
            vec![chan.clone()],
            vec![
                go::define(vec![go::id(&ch)], vec![go::call(go::id("make"), vec![chan])]),
                go::go(go::iife(vec![], producer)),
                go::ret(vec![go::id(&ch)]),
            ],
        ))
    }

    /// Nested loops for the generator clauses, outermost first
    fn comprehension_loops(
        &mut self,
        generators: &[Comprehension],
        innermost: &mut Innermost<'_, 's>,
    ) -> Result<Vec<Code>, TranslateError> {
        let (first, rest) = match generators.split_first() {
            Some(split) => split,
            None => return innermost(self),
        };
        if first.is_async {
            return Err(TranslateError::AsyncComprehension(first.target.pos));
        }

        let lp = self.for_loop(&first.target, &first.iter, |t| {
            let body = t.comprehension_loops(rest, innermost)?;
            if first.ifs.is_empty() {
                Ok(body)
            } else {
                let conds = t.expr_list(&first.ifs)?;
                Ok(vec![go::if_(go::and_all(conds), body, None)])
            }
        })?;
        Ok(vec![lp])
    }
}
